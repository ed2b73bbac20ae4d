// Generated gamma table carries more digits than f64 can hold
#![allow(clippy::excessive_precision)]

//! wcag-color: sRGB color types with WCAG 2.x accessibility math
//!
//! This library provides the small amount of color science needed to judge
//! whether text stays legible on a colored background:
//!
//! - [`Srgb`]: 8-bit gamma-encoded color, parsed from hex strings
//! - [`LinearRgb`]: linear light intensity, used for luminance
//! - [`relative_luminance()`] and [`contrast_ratio()`] per WCAG 2.x
//! - [`is_light()`] and [`TextColor`] for picking black or white text
//!
//! # Quick Start
//!
//! ```
//! use wcag_color::{contrast_ratio, Srgb, TextColor};
//!
//! let blue: Srgb = "#3B82F6".parse().unwrap();
//! let text = TextColor::for_background(blue);
//! let ratio = contrast_ratio(blue, text.srgb());
//!
//! assert_eq!(text, TextColor::White);
//! assert!(ratio > 3.0 && ratio < 4.5);
//! ```
//!
//! # Relative Luminance
//!
//! WCAG defines relative luminance on linear channels:
//!
//! ```text
//! L = 0.2126 * R + 0.7152 * G + 0.0722 * B
//! ```
//!
//! where each channel is decoded from sRGB with the IEC 61966-2-1 transfer
//! function. Since inputs are 8-bit, the decode is a 256-entry table
//! generated by `build.rs`, exact to f64 precision.
//!
//! # Contrast Ratio
//!
//! ```text
//! ratio = (L_lighter + 0.05) / (L_darker + 0.05)
//! ```
//!
//! The ratio ranges from 1 (identical colors) to 21 (black on white).
//!
//! # Light or Dark
//!
//! Whether a color counts as "light" uses perceived brightness (the YIQ
//! weighting `0.299 R + 0.587 G + 0.114 B` on gamma-encoded channels), not
//! luminance. A color is light when its brightness is at least 0.5.

pub mod color;
pub mod error;
pub mod wcag;

pub use color::{LinearRgb, Srgb};
pub use error::ParseColorError;
pub use wcag::{brightness, contrast_ratio, is_light, relative_luminance, TextColor};
