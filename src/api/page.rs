use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::palette::OverlayQuery;
use crate::error::{ApiError, RenderError};
use crate::models::Overlay;
use crate::server::AppState;
use crate::services::PaletteReport;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PngQuery {
    /// "contrast" (default) or "luminance"
    #[serde(default)]
    pub overlay: Overlay,
    /// Output scale, 1 to 4
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

fn render_svg(state: &AppState, overlay: Overlay) -> Result<String, ApiError> {
    let config = state.store.snapshot();
    let report = PaletteReport::build(&config, overlay)?;
    Ok(state
        .templates
        .render_svg(&report)
        .map_err(RenderError::from)?)
}

/// HTML page with the grid, per-base and per-step layouts
#[utoipa::path(
    get,
    path = "/",
    params(OverlayQuery),
    responses(
        (status = 200, description = "Palette page", body = String, content_type = "text/html"),
        (status = 400, description = "Unknown overlay"),
    ),
    tag = "Page"
)]
pub async fn handle_index(
    State(state): State<AppState>,
    Query(query): Query<OverlayQuery>,
) -> Result<Html<String>, ApiError> {
    let config = state.store.snapshot();
    let report = PaletteReport::build(&config, query.overlay)?;
    let html = state
        .templates
        .render_page(&report, state.dev_mode)
        .map_err(RenderError::from)?;
    Ok(Html(html))
}

/// Grid layout as SVG
#[utoipa::path(
    get,
    path = "/palette.svg",
    params(OverlayQuery),
    responses(
        (status = 200, description = "Palette grid", body = String, content_type = "image/svg+xml"),
        (status = 400, description = "Unknown overlay"),
    ),
    tag = "Page"
)]
pub async fn handle_svg(
    State(state): State<AppState>,
    Query(query): Query<OverlayQuery>,
) -> Result<Response, ApiError> {
    let svg = render_svg(&state, query.overlay)?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        svg,
    )
        .into_response())
}

/// Grid layout rasterized to PNG
#[utoipa::path(
    get,
    path = "/palette.png",
    params(PngQuery),
    responses(
        (status = 200, description = "Palette grid", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Unknown overlay or unsupported scale"),
    ),
    tag = "Page"
)]
pub async fn handle_png(
    State(state): State<AppState>,
    Query(query): Query<PngQuery>,
) -> Result<Response, ApiError> {
    let svg = render_svg(&state, query.overlay)?;

    let renderer = state.renderer.clone();
    let scale = query.scale;
    let png = tokio::task::spawn_blocking(move || renderer.render_png(&svg, scale))
        .await
        .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Bytes::from(png),
    )
        .into_response())
}
