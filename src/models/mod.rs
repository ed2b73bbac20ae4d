pub mod config;
pub mod palette;

pub use config::{HexColor, PaletteConfig, Thresholds};
pub use palette::{Overlay, SwatchKey};
