use crate::assets::AssetLoader;
use crate::error::ConfigError;
use crate::models::SwatchKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use utoipa::ToSchema;
use wcag_color::{ParseColorError, Srgb};

/// Palette configuration loaded from config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaletteConfig {
    /// Accessibility thresholds applied by the classifier
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Ordered steps (columns), lightest first
    pub steps: Vec<String>,

    /// Ordered color families (rows)
    pub bases: Vec<String>,

    /// Color table: base -> step -> hex color
    #[schema(value_type = Object)]
    pub colors: BTreeMap<String, BTreeMap<String, HexColor>>,
}

/// Thresholds for flagging swatches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Thresholds {
    /// Contrast ratios strictly below this fail
    #[serde(default = "default_minimum_contrast_ratio")]
    pub minimum_contrast_ratio: f64,

    /// Peer groups whose luminance spread is strictly above this are checked for outliers
    #[serde(default = "default_maximum_luminance_deviation")]
    pub maximum_luminance_deviation: f64,
}

fn default_minimum_contrast_ratio() -> f64 {
    4.5 // WCAG AA, normal text
}

fn default_maximum_luminance_deviation() -> f64 {
    0.1
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            minimum_contrast_ratio: default_minimum_contrast_ratio(),
            maximum_luminance_deviation: default_maximum_luminance_deviation(),
        }
    }
}

/// sRGB color that (de)serializes as a hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Srgb);

impl TryFrom<String> for HexColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(HexColor)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0.to_string()
    }
}

impl PaletteConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from AssetLoader (external file or embedded)
    ///
    /// An external file that fails to load or validate is reported and the
    /// embedded default is used instead.
    pub fn load_from_assets(loader: &AssetLoader) -> Result<Self, ConfigError> {
        let loaded = loader
            .read_config_string()
            .map_err(ConfigError::from)
            .and_then(|content| Self::from_yaml(&content));

        match loaded {
            Ok(config) => {
                tracing::info!(
                    bases = config.bases.len(),
                    steps = config.steps.len(),
                    "Loaded palette configuration"
                );
                Ok(config)
            }
            Err(e) if loader.has_external_config() => {
                tracing::warn!(%e, "Failed to load config, using embedded default");
                Self::from_yaml(&AssetLoader::embedded_config_string()?)
            }
            Err(e) => Err(e),
        }
    }

    /// Check the structural invariants of the palette.
    ///
    /// Every (base, step) pair must resolve to a color. Colors for bases or
    /// steps outside the palette are allowed and ignored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bases.is_empty() {
            return Err(ConfigError::NoBases);
        }
        if self.steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }

        let mut seen = HashSet::new();
        for base in &self.bases {
            if !seen.insert(base.as_str()) {
                return Err(ConfigError::DuplicateBase(base.clone()));
            }
        }
        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.as_str()) {
                return Err(ConfigError::DuplicateStep(step.clone()));
            }
        }

        for key in self.keys() {
            self.lookup(&key.base, &key.step)?;
        }

        check_threshold(
            "minimum_contrast_ratio",
            self.thresholds.minimum_contrast_ratio,
        )?;
        check_threshold(
            "maximum_luminance_deviation",
            self.thresholds.maximum_luminance_deviation,
        )?;

        Ok(())
    }

    /// Resolve a (base, step) pair to its color
    pub fn lookup(&self, base: &str, step: &str) -> Result<Srgb, ConfigError> {
        self.colors
            .get(base)
            .and_then(|steps| steps.get(step))
            .map(|color| color.0)
            .ok_or_else(|| ConfigError::MissingColor(SwatchKey::new(base, step)))
    }

    /// Whether the key is part of the palette (not merely present in the color table)
    pub fn contains(&self, key: &SwatchKey) -> bool {
        self.bases.contains(&key.base) && self.steps.contains(&key.step)
    }

    /// All palette keys, bases outer and steps inner
    pub fn keys(&self) -> impl Iterator<Item = SwatchKey> + '_ {
        self.bases.iter().flat_map(move |base| {
            self.steps
                .iter()
                .map(move |step| SwatchKey::new(base.clone(), step.clone()))
        })
    }

    /// Colors of every base at one step, in base order
    pub fn peer_colors(&self, step: &str) -> Result<Vec<Srgb>, ConfigError> {
        self.bases
            .iter()
            .map(|base| self.lookup(base, step))
            .collect()
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}
