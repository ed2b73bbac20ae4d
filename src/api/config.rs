use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::PaletteConfig;
use crate::server::AppState;
use crate::services::ChangeSource;

/// Active palette configuration
#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Current palette configuration", body = PaletteConfig),
    ),
    tag = "Config"
)]
pub async fn handle_get_config(State(state): State<AppState>) -> Json<PaletteConfig> {
    Json((*state.store.snapshot()).clone())
}

/// Replace the palette configuration.
///
/// Changes live in memory only and are lost on restart.
#[utoipa::path(
    put,
    path = "/api/config",
    request_body = PaletteConfig,
    responses(
        (status = 200, description = "Configuration replaced", body = PaletteConfig),
        (status = 422, description = "Configuration rejected; the previous one stays active"),
    ),
    tag = "Config"
)]
pub async fn handle_put_config(
    State(state): State<AppState>,
    Json(candidate): Json<PaletteConfig>,
) -> Result<Json<PaletteConfig>, ApiError> {
    let installed = state.store.replace(candidate, ChangeSource::Api)?;
    Ok(Json((*installed).clone()))
}
