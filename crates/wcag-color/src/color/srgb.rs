//! sRGB color type
//!
//! sRGB is the encoding used by design tokens, CSS and image files. Channels
//! are stored as 8-bit values exactly as written in a hex string.

use std::fmt;
use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use crate::error::ParseColorError;

/// A color in sRGB color space with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb {
    /// Red channel (gamma-encoded, 0..=255)
    pub r: u8,
    /// Green channel (gamma-encoded, 0..=255)
    pub g: u8,
    /// Blue channel (gamma-encoded, 0..=255)
    pub b: u8,
}

impl Srgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    ///
    /// # Example
    /// ```
    /// use wcag_color::Srgb;
    /// let white = Srgb::from_bytes([255, 255, 255]);
    /// assert_eq!(white, Srgb::WHITE);
    /// ```
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to linear light.
    #[inline]
    pub fn to_linear(self) -> LinearRgb {
        LinearRgb::from(self)
    }
}

impl fmt::Display for Srgb {
    /// Formats as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use wcag_color::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Srgb::WHITE);
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Srgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Byte slicing below assumes one byte per digit
        if !s.is_ascii() {
            return Err(ParseColorError::NonAscii);
        }
        // from_str_radix alone would also take a leading '+'
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(c));
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        let white: Srgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Srgb::WHITE);

        let black: Srgb = "#000000".parse().unwrap();
        assert_eq!(black, Srgb::BLACK);

        let blue: Srgb = "#3B82F6".parse().unwrap();
        assert_eq!(blue, Srgb::new(0x3B, 0x82, 0xF6));

        let no_hash: Srgb = "FFFFFF".parse().unwrap();
        assert_eq!(no_hash, Srgb::WHITE);
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        let white: Srgb = "#FFF".parse().unwrap();
        assert_eq!(white, Srgb::WHITE);

        // Tailwind writes black and white as #000 / #fff
        let black: Srgb = "#000".parse().unwrap();
        assert_eq!(black, Srgb::BLACK);

        let color: Srgb = "#ABC".parse().unwrap();
        assert_eq!(color, Srgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_errors() {
        let result = "#GGG".parse::<Srgb>();
        assert_eq!(result, Err(ParseColorError::InvalidDigit('G')));

        // Sign characters are not hex digits, even where an integer parse allows them
        let result = "#+f+f+f".parse::<Srgb>();
        assert_eq!(result, Err(ParseColorError::InvalidDigit('+')));

        let result = "#+ff".parse::<Srgb>();
        assert_eq!(result, Err(ParseColorError::InvalidDigit('+')));

        let result = "#FFFF".parse::<Srgb>();
        assert!(matches!(result, Err(ParseColorError::InvalidLength)));

        let result = "".parse::<Srgb>();
        assert!(matches!(result, Err(ParseColorError::InvalidLength)));

        let result = "#".parse::<Srgb>();
        assert!(matches!(result, Err(ParseColorError::InvalidLength)));

        let result = "#ééé".parse::<Srgb>();
        assert!(matches!(result, Err(ParseColorError::NonAscii)));
    }

    #[test]
    fn test_hex_parsing_whitespace_and_case() {
        let white: Srgb = "  #FFFFFF  ".parse().unwrap();
        assert_eq!(white, Srgb::WHITE);

        let upper: Srgb = "#ABCDEF".parse().unwrap();
        let lower: Srgb = "#abcdef".parse().unwrap();
        let mixed: Srgb = "#AbCdEf".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, mixed);
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Srgb::new(0x3B, 0x82, 0xF6).to_string(), "#3b82f6");
        assert_eq!(Srgb::BLACK.to_string(), "#000000");

        let parsed: Srgb = Srgb::new(1, 2, 3).to_string().parse().unwrap();
        assert_eq!(parsed, Srgb::new(1, 2, 3));
    }

    #[test]
    fn test_bytes() {
        assert_eq!(Srgb::from_bytes([1, 2, 3]), Srgb::new(1, 2, 3));
        assert_eq!(Srgb::new(1, 2, 3).to_bytes(), [1, 2, 3]);
    }
}
