pub mod classifier;
pub mod config_store;
pub mod file_watcher;
pub mod palette_view;
pub mod template_service;

pub use classifier::{Classification, SwatchClassifier, Tenths};
pub use config_store::{ChangeSource, ConfigChange, ConfigStore};
pub use file_watcher::{FileChangeEvent, FileWatcher};
pub use palette_view::{BaseRow, PaletteReport, StepGroup, SwatchView};
pub use template_service::{TemplateError, TemplateService};
