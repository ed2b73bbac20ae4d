//! Color types and conversion utilities
//!
//! - **Srgb**: 8-bit gamma-encoded color, as found in design tokens and CSS.
//! - **LinearRgb**: linear light intensity. Use for luminance and any math.
//!
//! # Example
//!
//! ```
//! use wcag_color::{LinearRgb, Srgb};
//!
//! let srgb = Srgb::new(128, 64, 32);
//! let linear = LinearRgb::from(srgb);
//! assert!(linear.r < 0.5);
//! ```

mod linear_rgb;
mod lut;
mod srgb;

pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
