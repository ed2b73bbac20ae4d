use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Identifies one swatch: a color family and a step within it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct SwatchKey {
    /// Color family, e.g. "blue"
    pub base: String,
    /// Ordinal weight, e.g. "500"
    pub step: String,
}

impl SwatchKey {
    pub fn new(base: impl Into<String>, step: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            step: step.into(),
        }
    }
}

impl fmt::Display for SwatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.step)
    }
}

/// Which metric is drawn on top of each swatch
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Overlay {
    /// WCAG contrast ratio against the paired text color
    #[default]
    Contrast,
    /// WCAG relative luminance
    Luminance,
}

impl Overlay {
    pub const ALL: [Overlay; 2] = [Overlay::Contrast, Overlay::Luminance];

    pub fn as_str(self) -> &'static str {
        match self {
            Overlay::Contrast => "contrast",
            Overlay::Luminance => "luminance",
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Overlay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contrast" => Ok(Overlay::Contrast),
            "luminance" => Ok(Overlay::Luminance),
            other => Err(format!(
                "unknown overlay '{other}' (expected 'contrast' or 'luminance')"
            )),
        }
    }
}
