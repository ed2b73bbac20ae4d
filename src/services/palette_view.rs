//! Palette layouts.
//!
//! A palette is shown three ways: a grid (one row per base), one section per
//! base, and one section per step. Only the per-step layout compares a swatch
//! with its peers, so luminance outliers are flagged there and nowhere else.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ConfigError;
use crate::models::{Overlay, PaletteConfig, SwatchKey, Thresholds};
use crate::services::classifier::SwatchClassifier;

/// One classified swatch, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SwatchView {
    pub base: String,
    pub step: String,
    /// Swatch color as `#rrggbb`
    pub hex: String,
    /// Metric rounded to one decimal place
    pub value: String,
    /// Whether the swatch fails the active rule
    pub invalid: bool,
    /// "black" or "white"
    pub text_color: String,
}

/// All steps of one base, in step order
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BaseRow {
    pub base: String,
    /// Capitalized base name
    pub label: String,
    pub swatches: Vec<SwatchView>,
}

/// All bases at one step, classified against each other
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StepGroup {
    pub step: String,
    pub swatches: Vec<SwatchView>,
}

/// Everything needed to draw the palette for one overlay
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaletteReport {
    pub overlay: Overlay,
    pub thresholds: Thresholds,
    /// Column headers
    pub steps: Vec<String>,
    /// Grid and per-base layouts (no peer comparison)
    pub rows: Vec<BaseRow>,
    /// Per-step layout (peer comparison)
    pub step_groups: Vec<StepGroup>,
    /// Flagged swatches in the per-step layout
    pub invalid_count: usize,
}

impl PaletteReport {
    /// Classify every swatch of the palette for the given overlay
    pub fn build(config: &PaletteConfig, overlay: Overlay) -> Result<Self, ConfigError> {
        let classifier = SwatchClassifier::new(config.thresholds);

        let rows = config
            .bases
            .iter()
            .map(|base| {
                let swatches = config
                    .steps
                    .iter()
                    .map(|step| classify_one(config, &classifier, base, step, overlay, &[]))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(BaseRow {
                    base: base.clone(),
                    label: capitalize(base),
                    swatches,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let step_groups = config
            .steps
            .iter()
            .map(|step| {
                let peers = config.peer_colors(step)?;
                let swatches = config
                    .bases
                    .iter()
                    .map(|base| classify_one(config, &classifier, base, step, overlay, &peers))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(StepGroup {
                    step: step.clone(),
                    swatches,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let invalid_count = step_groups
            .iter()
            .flat_map(|group| &group.swatches)
            .filter(|swatch| swatch.invalid)
            .count();

        tracing::debug!(
            overlay = %overlay,
            swatches = config.bases.len() * config.steps.len(),
            invalid = invalid_count,
            "Built palette report"
        );

        Ok(Self {
            overlay,
            thresholds: config.thresholds,
            steps: config.steps.clone(),
            rows,
            step_groups,
            invalid_count,
        })
    }

    /// Classify a single swatch.
    ///
    /// With `with_peers` the swatch is compared against its step group, as in
    /// the per-step layout. Returns `None` for keys outside the palette.
    pub fn swatch(
        config: &PaletteConfig,
        key: &SwatchKey,
        overlay: Overlay,
        with_peers: bool,
    ) -> Result<Option<SwatchView>, ConfigError> {
        if !config.contains(key) {
            return Ok(None);
        }
        let classifier = SwatchClassifier::new(config.thresholds);
        let peers = if with_peers {
            config.peer_colors(&key.step)?
        } else {
            Vec::new()
        };
        classify_one(config, &classifier, &key.base, &key.step, overlay, &peers).map(Some)
    }

    /// Flagged swatches of the per-step layout, in step then base order
    pub fn invalid_swatches(&self) -> impl Iterator<Item = &SwatchView> {
        self.step_groups
            .iter()
            .flat_map(|group| &group.swatches)
            .filter(|swatch| swatch.invalid)
    }
}

fn classify_one(
    config: &PaletteConfig,
    classifier: &SwatchClassifier,
    base: &str,
    step: &str,
    overlay: Overlay,
    peers: &[wcag_color::Srgb],
) -> Result<SwatchView, ConfigError> {
    let color = config.lookup(base, step)?;
    let result = classifier.classify(color, overlay, peers);
    Ok(SwatchView {
        base: base.to_string(),
        step: step.to_string(),
        hex: color.to_string(),
        value: result.value.to_string(),
        invalid: result.invalid,
        text_color: result.text.as_str().to_string(),
    })
}

/// "BLUE" and "blue" both become "Blue"
fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
