pub mod config;
pub mod dev;
pub mod page;
pub mod palette;

pub use config::{__path_handle_get_config, __path_handle_put_config};
pub use config::{handle_get_config, handle_put_config};
pub use page::{__path_handle_index, __path_handle_png, __path_handle_svg};
pub use page::{handle_index, handle_png, handle_svg, PngQuery};
pub use palette::{__path_handle_palette, __path_handle_swatch};
pub use palette::{handle_palette, handle_swatch, OverlayQuery, SwatchQuery};
