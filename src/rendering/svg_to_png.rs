use resvg::usvg::{self, fontdb, Transform};
use std::ops::RangeInclusive;
use std::sync::Arc;
use tiny_skia::Pixmap;

use crate::error::RenderError;

/// Scale factors accepted for PNG output
pub const SCALE_RANGE: RangeInclusive<f32> = 1.0..=4.0;

/// Rasterizes palette SVGs to PNG.
pub struct SvgRenderer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
}

impl SvgRenderer {
    /// Create a renderer using the system fonts
    pub fn new() -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for SVG text rendering"
        );

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Render SVG to PNG at `scale` times its intrinsic size, on white.
    pub fn render_png(&self, svg: &str, scale: f32) -> Result<Vec<u8>, RenderError> {
        if !SCALE_RANGE.contains(&scale) {
            return Err(RenderError::UnsupportedScale(scale));
        }

        let pixmap = self.rasterize_svg(svg.as_bytes(), scale)?;
        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;

        tracing::debug!(
            width = pixmap.width(),
            height = pixmap.height(),
            bytes = png.len(),
            "Rendered PNG"
        );

        Ok(png)
    }

    fn rasterize_svg(&self, svg_data: &[u8], scale: f32) -> Result<Pixmap, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let width = (svg_size.width() * scale).ceil() as u32;
        let height = (svg_size.height() * scale).ceil() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}
