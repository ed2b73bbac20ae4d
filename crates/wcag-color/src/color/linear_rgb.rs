//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! Luminance is a weighted sum, so it must be computed here.

use super::lut::srgb8_to_linear;
use super::srgb::Srgb;

/// A color in linear RGB color space.
///
/// Values are in the range 0.0..=1.0 and represent light intensity
/// proportional to physical light power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// WCAG relative luminance of this color (0.0 black to 1.0 white).
    #[inline]
    pub fn luminance(self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

impl From<Srgb> for LinearRgb {
    /// Decode sRGB to linear light with the IEC 61966-2-1 transfer function.
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb8_to_linear(srgb.r),
            g: srgb8_to_linear(srgb.g),
            b: srgb8_to_linear(srgb.b),
        }
    }
}
