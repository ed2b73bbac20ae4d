use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::assets::AssetLoader;
use crate::models::Overlay;
use crate::services::palette_view::{PaletteReport, SwatchView};

pub const PALETTE_SVG: &str = "palette.svg";
pub const INDEX_HTML: &str = "index.html";

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Template not found: {0}")]
    NotFound(String),
}

/// Positioned text in the SVG grid
#[derive(Debug, Clone, Serialize)]
pub struct SvgText {
    pub x: u32,
    pub y: u32,
    pub text: String,
}

/// One positioned swatch in the SVG grid
#[derive(Debug, Clone, Serialize)]
pub struct SvgCell<'a> {
    pub x: u32,
    pub y: u32,
    pub text_x: u32,
    pub text_y: u32,
    pub swatch: &'a SwatchView,
}

/// Grid layout with coordinates resolved, so the template only iterates
#[derive(Debug, Clone, Serialize)]
pub struct SvgGrid<'a> {
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub headers: Vec<SvgText>,
    pub labels: Vec<SvgText>,
    pub cells: Vec<SvgCell<'a>>,
}

impl<'a> SvgGrid<'a> {
    const CELL_WIDTH: u32 = 56;
    const CELL_HEIGHT: u32 = 48;
    const LABEL_WIDTH: u32 = 72;
    const HEADER_HEIGHT: u32 = 32;
    const FONT_BASELINE: u32 = 4;

    pub fn for_report(report: &'a PaletteReport) -> Self {
        let column_x = |column: usize| Self::LABEL_WIDTH + column as u32 * Self::CELL_WIDTH;
        let row_y = |row: usize| Self::HEADER_HEIGHT + row as u32 * Self::CELL_HEIGHT;

        let headers = report
            .steps
            .iter()
            .enumerate()
            .map(|(column, step)| SvgText {
                x: column_x(column) + Self::CELL_WIDTH / 2,
                y: Self::HEADER_HEIGHT - 10,
                text: step.clone(),
            })
            .collect();

        let labels = report
            .rows
            .iter()
            .enumerate()
            .map(|(row, base_row)| SvgText {
                x: 8,
                y: row_y(row) + Self::CELL_HEIGHT / 2 + Self::FONT_BASELINE,
                text: base_row.label.clone(),
            })
            .collect();

        let cells = report
            .rows
            .iter()
            .enumerate()
            .flat_map(|(row, base_row)| {
                base_row
                    .swatches
                    .iter()
                    .enumerate()
                    .map(move |(column, swatch)| SvgCell {
                        x: column_x(column),
                        y: row_y(row),
                        text_x: column_x(column) + Self::CELL_WIDTH / 2,
                        text_y: row_y(row) + Self::CELL_HEIGHT / 2 + Self::FONT_BASELINE,
                        swatch,
                    })
            })
            .collect();

        Self {
            width: column_x(report.steps.len()),
            height: row_y(report.rows.len()),
            cell_width: Self::CELL_WIDTH,
            cell_height: Self::CELL_HEIGHT,
            headers,
            labels,
            cells,
        }
    }
}

/// Service for rendering the palette SVG and HTML page with Tera
pub struct TemplateService {
    loader: Arc<AssetLoader>,
}

impl TemplateService {
    pub fn new(loader: Arc<AssetLoader>) -> Self {
        let templates = loader.list_templates();
        tracing::info!(templates = ?templates, "Template service initialized");
        Self { loader }
    }

    /// Register custom Tera filters
    fn register_filters(tera: &mut Tera) {
        // Swatch rings need to stand out on both light and dark backgrounds
        tera.register_filter(
            "ring_color",
            |value: &tera::Value, _args: &std::collections::HashMap<String, tera::Value>| {
                let invalid = tera::try_get_value!("ring_color", "value", bool, value);
                let color = if invalid { "#dc2626" } else { "none" };
                Ok(tera::Value::String(color.to_string()))
            },
        );
    }

    /// Render a template with the given data
    /// Templates are always loaded fresh so edits show up without a restart
    pub fn render(&self, name: &str, context: &Context) -> Result<String, TemplateError> {
        let content = self
            .loader
            .read_template_string(name)
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;

        let mut tera = Tera::default();
        // Palette names come from user config; escape them in markup
        tera.autoescape_on(vec![".html", ".svg"]);
        tera.add_raw_template(name, &content)?;
        Self::register_filters(&mut tera);

        Ok(tera.render(name, context)?)
    }

    /// Render the grid layout as a standalone SVG document
    pub fn render_svg(&self, report: &PaletteReport) -> Result<String, TemplateError> {
        let mut context = Context::new();
        context.insert("overlay", &report.overlay);
        context.insert("grid", &SvgGrid::for_report(report));
        self.render(PALETTE_SVG, &context)
    }

    /// Render the full HTML page
    pub fn render_page(
        &self,
        report: &PaletteReport,
        dev_mode: bool,
    ) -> Result<String, TemplateError> {
        let mut context = Context::from_serialize(report)?;
        context.insert("overlays", &Overlay::ALL);
        context.insert("dev_mode", &dev_mode);
        self.render(INDEX_HTML, &context)
    }
}
