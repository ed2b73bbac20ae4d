//! Holder for the active palette configuration.
//!
//! Configuration changes only through [`ConfigStore::replace`], which
//! validates the candidate before swapping it in. Readers take a cheap
//! [`Arc`] snapshot and never observe a half-applied update.

use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::assets::AssetLoader;
use crate::error::ConfigError;
use crate::models::PaletteConfig;

/// Where a configuration change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    Api,
    File,
}

impl ChangeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeSource::Api => "api",
            ChangeSource::File => "file",
        }
    }
}

/// Event sent after a configuration was replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
    /// Incremented on every successful replacement
    pub version: u64,
    pub source: ChangeSource,
}

struct Versioned {
    config: Arc<PaletteConfig>,
    version: u64,
}

/// Validated, swappable palette configuration
pub struct ConfigStore {
    current: RwLock<Versioned>,
    sender: broadcast::Sender<ConfigChange>,
}

impl ConfigStore {
    /// Create a store, rejecting an invalid initial configuration
    pub fn new(initial: PaletteConfig) -> Result<Self, ConfigError> {
        initial.validate()?;
        let (sender, _) = broadcast::channel(16);
        Ok(Self {
            current: RwLock::new(Versioned {
                config: Arc::new(initial),
                version: 0,
            }),
            sender,
        })
    }

    /// Load the initial configuration through an asset loader
    pub fn load(loader: &AssetLoader) -> Result<Self, ConfigError> {
        Self::new(PaletteConfig::load_from_assets(loader)?)
    }

    /// Current configuration
    pub fn snapshot(&self) -> Arc<PaletteConfig> {
        self.read().config.clone()
    }

    pub fn version(&self) -> u64 {
        self.read().version
    }

    /// Validate and install a new configuration.
    ///
    /// On error the previous configuration stays active.
    pub fn replace(
        &self,
        candidate: PaletteConfig,
        source: ChangeSource,
    ) -> Result<Arc<PaletteConfig>, ConfigError> {
        if let Err(e) = candidate.validate() {
            tracing::warn!(%e, source = source.as_str(), "Rejected palette update");
            return Err(e);
        }

        let config = Arc::new(candidate);
        let version = {
            let mut guard = self
                .current
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.version += 1;
            guard.config = config.clone();
            guard.version
        };

        tracing::info!(
            version,
            source = source.as_str(),
            bases = config.bases.len(),
            steps = config.steps.len(),
            "Palette configuration replaced"
        );

        // No subscribers is fine
        let _ = self.sender.send(ConfigChange { version, source });

        Ok(config)
    }

    /// Re-read the configuration file and install it
    pub fn reload_from(&self, loader: &AssetLoader) -> Result<Arc<PaletteConfig>, ConfigError> {
        let content = loader.read_config_string()?;
        let candidate = PaletteConfig::from_yaml(&content)?;
        self.replace(candidate, ChangeSource::File)
    }

    /// Subscribe to configuration changes
    pub fn subscribe(&self) -> broadcast::Receiver<ConfigChange> {
        self.sender.subscribe()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Versioned> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SwatchKey;

    fn default_store() -> ConfigStore {
        ConfigStore::load(&AssetLoader::new(None, None)).unwrap()
    }

    #[test]
    fn test_snapshot_is_shared() {
        let store = default_store();
        let a = store.snapshot();
        let b = store.snapshot();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_replace_valid_config() {
        let store = default_store();
        let mut candidate = (*store.snapshot()).clone();
        candidate.thresholds.minimum_contrast_ratio = 3.0;

        let mut rx = store.subscribe();
        let installed = store.replace(candidate, ChangeSource::Api).unwrap();

        assert_eq!(installed.thresholds.minimum_contrast_ratio, 3.0);
        assert_eq!(store.snapshot().thresholds.minimum_contrast_ratio, 3.0);
        assert_eq!(store.version(), 1);
        assert_eq!(
            rx.try_recv().unwrap(),
            ConfigChange {
                version: 1,
                source: ChangeSource::Api
            }
        );
    }

    #[test]
    fn test_replace_rejects_dropped_key() {
        let store = default_store();
        let before = store.snapshot();

        let mut candidate = (*before).clone();
        candidate
            .colors
            .get_mut("blue")
            .unwrap()
            .remove("500");

        let mut rx = store.subscribe();
        let err = store.replace(candidate, ChangeSource::Api).unwrap_err();

        assert!(
            matches!(err, ConfigError::MissingColor(ref key) if *key == SwatchKey::new("blue", "500"))
        );
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.version(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_new_rejects_invalid_initial_config() {
        let mut config = (*default_store().snapshot()).clone();
        config.bases.clear();
        assert!(matches!(ConfigStore::new(config), Err(ConfigError::NoBases)));
    }

    #[test]
    fn test_reload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let loader = AssetLoader::new(Some(path.clone()), None);
        loader.seed_if_configured().unwrap();

        let store = ConfigStore::load(&loader).unwrap();
        assert_eq!(store.snapshot().bases.len(), 8);

        let content = std::fs::read_to_string(&path)
            .unwrap()
            .replace("bases: [gray, blue, green, yellow, pink, red, purple, indigo]", "bases: [gray, blue]");
        std::fs::write(&path, content).unwrap();

        let reloaded = store.reload_from(&loader).unwrap();
        assert_eq!(reloaded.bases, vec!["gray", "blue"]);
        assert_eq!(store.version(), 1);

        // A broken file leaves the last good config in place
        std::fs::write(&path, "steps: [").unwrap();
        assert!(store.reload_from(&loader).is_err());
        assert_eq!(store.snapshot().bases, vec!["gray", "blue"]);
    }
}
