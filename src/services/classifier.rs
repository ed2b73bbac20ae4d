//! Swatch classification.
//!
//! Turns a swatch color into the value drawn on it and decides whether the
//! swatch is flagged:
//!
//! - **Contrast**: WCAG contrast ratio against the paired text color (black
//!   on light swatches, white on dark ones). Flagged when the ratio is below
//!   the minimum.
//! - **Luminance**: WCAG relative luminance. Flagged only when compared
//!   against a peer group (the same step across all bases) whose rounded
//!   luminances spread more than the allowed deviation, and the swatch's
//!   rounded luminance is not the group's rounded median.
//!
//! Displayed values are rounded to one decimal place. The luminance check
//! works on those rounded values, so two swatches that display the same
//! number are always treated the same.

use std::fmt;
use wcag_color::{contrast_ratio, relative_luminance, Srgb, TextColor};

use crate::models::{Overlay, Thresholds};

/// A value rounded to one decimal place, stored as an integer count of tenths
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tenths(i64);

impl Tenths {
    /// Round half away from zero to one decimal place (0.649 -> 0.6, 0.25 -> 0.3)
    pub fn round(value: f64) -> Self {
        Self((value * 10.0).round() as i64)
    }

    pub fn from_tenths(tenths: i64) -> Self {
        Self(tenths)
    }

    pub fn tenths(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}

/// Median of rounded values, itself rounded to tenths.
///
/// Even-length inputs average the two middle values. Returns `None` for an
/// empty slice.
pub fn median(values: &[Tenths]) -> Option<Tenths> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        let sum = sorted[mid - 1].tenths() + sorted[mid].tenths();
        Some(Tenths::from_tenths((sum as f64 / 2.0).round() as i64))
    }
}

/// Sample standard deviation (n - 1 denominator) of rounded values.
///
/// Fewer than two values have no spread and yield 0. The variance is formed
/// from integer sums of tenths so that spreads landing exactly on a threshold
/// compare exactly.
pub fn sample_std_dev(values: &[Tenths]) -> f64 {
    let n = values.len() as i64;
    if n < 2 {
        return 0.0;
    }
    let sum: i64 = values.iter().map(|v| v.tenths()).sum();
    let sum_sq: i64 = values.iter().map(|v| v.tenths() * v.tenths()).sum();

    let variance_tenths = (n * sum_sq - sum * sum) as f64 / (n * (n - 1)) as f64;
    variance_tenths.sqrt() / 10.0
}

/// Result of classifying one swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Metric shown on the swatch
    pub value: Tenths,
    /// Whether the swatch is flagged
    pub invalid: bool,
    /// Text color used on top of the swatch
    pub text: TextColor,
}

/// Classifies swatches against a fixed set of thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchClassifier {
    thresholds: Thresholds,
}

impl SwatchClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Classify a swatch.
    ///
    /// `peers` only matters for [`Overlay::Luminance`]; pass an empty slice
    /// when the swatch is shown outside a peer group.
    pub fn classify(&self, color: Srgb, overlay: Overlay, peers: &[Srgb]) -> Classification {
        let text = TextColor::for_background(color);

        match overlay {
            Overlay::Contrast => {
                let ratio = contrast_ratio(color, text.srgb());
                Classification {
                    value: Tenths::round(ratio),
                    invalid: self.fails_contrast(ratio),
                    text,
                }
            }
            Overlay::Luminance => {
                let value = Tenths::round(relative_luminance(color));
                let peer_values: Vec<Tenths> = peers
                    .iter()
                    .map(|&peer| Tenths::round(relative_luminance(peer)))
                    .collect();
                Classification {
                    value,
                    invalid: self.is_luminance_outlier(value, &peer_values),
                    text,
                }
            }
        }
    }

    /// A ratio exactly at the minimum passes.
    pub fn fails_contrast(&self, ratio: f64) -> bool {
        ratio < self.thresholds.minimum_contrast_ratio
    }

    /// A spread exactly at the maximum deviation passes.
    pub fn is_luminance_outlier(&self, value: Tenths, peers: &[Tenths]) -> bool {
        let Some(mid) = median(peers) else {
            return false;
        };
        sample_std_dev(peers) > self.thresholds.maximum_luminance_deviation && value != mid
    }
}

impl Default for SwatchClassifier {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenths(values: &[f64]) -> Vec<Tenths> {
        values.iter().map(|&v| Tenths::round(v)).collect()
    }

    fn gray(v: u8) -> Srgb {
        Srgb::new(v, v, v)
    }

    #[test]
    fn test_tenths_rounding_and_display() {
        assert_eq!(Tenths::round(0.649).to_string(), "0.6");
        assert_eq!(Tenths::round(0.65).to_string(), "0.7");
        assert_eq!(Tenths::round(0.25).to_string(), "0.3");
        assert_eq!(Tenths::round(21.0).to_string(), "21.0");
        assert_eq!(Tenths::round(4.467).to_string(), "4.5");
        assert_eq!(Tenths::round(0.0).to_string(), "0.0");
        assert_eq!(Tenths::round(0.04).tenths(), 0);
    }

    #[test]
    fn test_median_odd_even_empty() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&tenths(&[0.1, 0.9, 0.5])), Some(Tenths::round(0.5)));
        // (0.2 + 0.3) / 2 = 0.25 rounds up
        assert_eq!(median(&tenths(&[0.3, 0.2])), Some(Tenths::round(0.3)));
        assert_eq!(
            median(&tenths(&[0.4, 0.1, 0.1, 0.4])),
            Some(Tenths::round(0.3))
        );
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&tenths(&[0.7])), 0.0);
        assert_eq!(sample_std_dev(&tenths(&[0.5, 0.5, 0.5])), 0.0);
        // Sample (n - 1) deviation of 0.1, 0.9, 0.5 is 0.4
        assert!((sample_std_dev(&tenths(&[0.1, 0.9, 0.5])) - 0.4).abs() < 1e-12);
        // 0.1, 0.2, 0.3 lands exactly on 0.1
        assert_eq!(sample_std_dev(&tenths(&[0.1, 0.2, 0.3])), 0.1);
    }

    #[test]
    fn test_contrast_pairs_white_with_black() {
        let classifier = SwatchClassifier::default();
        let result = classifier.classify(Srgb::WHITE, Overlay::Contrast, &[]);
        assert_eq!(result.text, TextColor::Black);
        assert_eq!(result.value.to_string(), "21.0");
        assert!(!result.invalid);
    }

    #[test]
    fn test_contrast_pairs_black_with_white() {
        let classifier = SwatchClassifier::default();
        let result = classifier.classify(Srgb::BLACK, Overlay::Contrast, &[]);
        assert_eq!(result.text, TextColor::White);
        assert_eq!(result.value.to_string(), "21.0");
        assert!(!result.invalid);
    }

    #[test]
    fn test_contrast_boundary() {
        let classifier = SwatchClassifier::default();
        assert!(!classifier.fails_contrast(4.5));
        assert!(classifier.fails_contrast(4.49));
        assert!(!classifier.fails_contrast(4.51));
    }

    #[test]
    fn test_contrast_failure_on_mid_blue() {
        let classifier = SwatchClassifier::default();
        let blue: Srgb = "#3B82F6".parse().unwrap();
        let result = classifier.classify(blue, Overlay::Contrast, &[]);
        assert_eq!(result.text, TextColor::White);
        assert_eq!(result.value.to_string(), "3.7");
        assert!(result.invalid);
    }

    #[test]
    fn test_contrast_ignores_peers() {
        let classifier = SwatchClassifier::default();
        let peers = [Srgb::BLACK, Srgb::WHITE, gray(128)];
        assert_eq!(
            classifier.classify(gray(128), Overlay::Contrast, &peers),
            classifier.classify(gray(128), Overlay::Contrast, &[])
        );
    }

    #[test]
    fn test_custom_contrast_threshold() {
        let classifier = SwatchClassifier::new(Thresholds {
            minimum_contrast_ratio: 3.0,
            ..Default::default()
        });
        let blue: Srgb = "#3B82F6".parse().unwrap();
        assert!(!classifier.classify(blue, Overlay::Contrast, &[]).invalid);
    }

    #[test]
    fn test_luminance_without_peers_is_valid() {
        let classifier = SwatchClassifier::default();
        for color in [Srgb::BLACK, Srgb::WHITE, gray(90), gray(243)] {
            assert!(!classifier.classify(color, Overlay::Luminance, &[]).invalid);
        }
    }

    #[test]
    fn test_luminance_singleton_peer_group_is_valid() {
        let classifier = SwatchClassifier::default();
        // Even a swatch far from its only peer is not flagged
        let result = classifier.classify(Srgb::WHITE, Overlay::Luminance, &[Srgb::BLACK]);
        assert!(!result.invalid);
    }

    #[test]
    fn test_luminance_outlier_rule() {
        let classifier = SwatchClassifier::default();
        let peers = tenths(&[0.1, 0.9, 0.5]);

        assert!(!classifier.is_luminance_outlier(Tenths::round(0.5), &peers));
        assert!(classifier.is_luminance_outlier(Tenths::round(0.1), &peers));
        assert!(classifier.is_luminance_outlier(Tenths::round(0.9), &peers));
    }

    #[test]
    fn test_luminance_spread_at_threshold_passes() {
        let classifier = SwatchClassifier::default();
        let peers = tenths(&[0.1, 0.2, 0.3]);
        assert!(!classifier.is_luminance_outlier(Tenths::round(0.1), &peers));
    }

    #[test]
    fn test_luminance_classify_with_gray_peers() {
        let classifier = SwatchClassifier::default();
        // Relative luminances round to 0.1, 0.5 and 0.9
        let (dark, mid, light) = (gray(90), gray(188), gray(243));
        let peers = [dark, light, mid];

        let result = classifier.classify(mid, Overlay::Luminance, &peers);
        assert_eq!(result.value.to_string(), "0.5");
        assert!(!result.invalid);

        let result = classifier.classify(dark, Overlay::Luminance, &peers);
        assert_eq!(result.value.to_string(), "0.1");
        assert!(result.invalid);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = SwatchClassifier::default();
        let peers = [gray(90), gray(188), gray(243)];
        for overlay in Overlay::ALL {
            let first = classifier.classify(gray(90), overlay, &peers);
            let second = classifier.classify(gray(90), overlay, &peers);
            assert_eq!(first, second);
        }
    }
}
