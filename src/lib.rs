//! Swatchgrid - accessible color palette checker
//!
//! Renders the swatches of a design-system color scale with their WCAG
//! contrast ratio or relative luminance and flags the ones that fail.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
