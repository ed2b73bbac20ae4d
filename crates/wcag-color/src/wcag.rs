//! WCAG 2.x luminance and contrast
//!
//! Formulas follow the WCAG 2.1 definitions of relative luminance and
//! contrast ratio. The light/dark split uses perceived brightness so that
//! the text color matches what a reader would pick by eye.

use crate::color::Srgb;

/// Brightness at or above which a color counts as light.
const LIGHT_BRIGHTNESS: f64 = 0.5;

/// WCAG relative luminance of an sRGB color (0.0 black to 1.0 white).
///
/// # Example
/// ```
/// use wcag_color::{relative_luminance, Srgb};
/// assert_eq!(relative_luminance(Srgb::BLACK), 0.0);
/// assert!((relative_luminance(Srgb::WHITE) - 1.0).abs() < 1e-9);
/// ```
#[inline]
pub fn relative_luminance(color: Srgb) -> f64 {
    color.to_linear().luminance()
}

/// WCAG contrast ratio between two colors, from 1.0 to 21.0.
///
/// The argument order does not matter.
pub fn contrast_ratio(a: Srgb, b: Srgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la > lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Perceived brightness (YIQ weighting on gamma-encoded channels), 0.0..=1.0.
#[inline]
pub fn brightness(color: Srgb) -> f64 {
    (color.r as f64 * 299.0 + color.g as f64 * 587.0 + color.b as f64 * 114.0) / 1000.0 / 255.0
}

/// Whether a color reads as light, i.e. wants dark text on top of it.
#[inline]
pub fn is_light(color: Srgb) -> bool {
    brightness(color) >= LIGHT_BRIGHTNESS
}

/// Text color paired with a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    /// Black text on light backgrounds, white text otherwise.
    pub fn for_background(background: Srgb) -> Self {
        if is_light(background) {
            TextColor::Black
        } else {
            TextColor::White
        }
    }

    pub fn srgb(self) -> Srgb {
        match self {
            TextColor::Black => Srgb::BLACK,
            TextColor::White => Srgb::WHITE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextColor::Black => "black",
            TextColor::White => "white",
        }
    }
}
