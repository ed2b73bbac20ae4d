use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::{Overlay, SwatchKey};
use crate::server::AppState;
use crate::services::{PaletteReport, SwatchView};

/// Overlay selection shared by the palette endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OverlayQuery {
    /// "contrast" (default) or "luminance"
    #[serde(default)]
    pub overlay: Overlay,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SwatchQuery {
    /// "contrast" (default) or "luminance"
    #[serde(default)]
    pub overlay: Overlay,
    /// Compare against the other bases at the same step
    #[serde(default)]
    pub peers: bool,
}

/// Classified palette in all layouts
#[utoipa::path(
    get,
    path = "/api/palette",
    params(OverlayQuery),
    responses(
        (status = 200, description = "Palette classified for the requested overlay", body = PaletteReport),
        (status = 400, description = "Unknown overlay"),
    ),
    tag = "Palette"
)]
pub async fn handle_palette(
    State(state): State<AppState>,
    Query(query): Query<OverlayQuery>,
) -> Result<Json<PaletteReport>, ApiError> {
    let config = state.store.snapshot();
    let report = PaletteReport::build(&config, query.overlay)?;
    Ok(Json(report))
}

/// One classified swatch
#[utoipa::path(
    get,
    path = "/api/swatch/{base}/{step}",
    params(
        ("base" = String, Path, description = "Color family, e.g. 'blue'"),
        ("step" = String, Path, description = "Palette step, e.g. '500'"),
        SwatchQuery,
    ),
    responses(
        (status = 200, description = "Swatch classification", body = SwatchView),
        (status = 400, description = "Unknown overlay"),
        (status = 404, description = "Swatch is not part of the palette"),
    ),
    tag = "Palette"
)]
pub async fn handle_swatch(
    State(state): State<AppState>,
    Path((base, step)): Path<(String, String)>,
    Query(query): Query<SwatchQuery>,
) -> Result<Json<SwatchView>, ApiError> {
    let key = SwatchKey::new(base, step);
    let config = state.store.snapshot();

    PaletteReport::swatch(&config, &key, query.overlay, query.peers)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("swatch {key}")))
}
