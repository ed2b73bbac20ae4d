//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::rendering::SvgRenderer;
use crate::services::{ConfigStore, TemplateService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub templates: Arc<TemplateService>,
    pub renderer: Arc<SvgRenderer>,
    /// Serve `/dev/events` and make the page reload on config changes
    pub dev_mode: bool,
}

/// Create application state from an asset loader.
pub fn create_app_state(
    asset_loader: Arc<AssetLoader>,
    dev_mode: bool,
) -> anyhow::Result<AppState> {
    let store = Arc::new(
        ConfigStore::load(&asset_loader)
            .map_err(|e| anyhow::anyhow!("Failed to load palette configuration: {e}"))?,
    );
    let templates = Arc::new(TemplateService::new(asset_loader));
    let renderer = Arc::new(SvgRenderer::new());

    Ok(AppState {
        store,
        templates,
        renderer,
        dev_mode,
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Page and images
        .route("/", get(api::handle_index))
        .route("/palette.svg", get(api::handle_svg))
        .route("/palette.png", get(api::handle_png))
        // JSON API
        .route("/api/palette", get(api::handle_palette))
        .route("/api/swatch/:base/:step", get(api::handle_swatch))
        .route(
            "/api/config",
            get(api::handle_get_config).put(api::handle_put_config),
        )
        // Health check
        .route("/health", get(|| async { "OK" }));

    if state.dev_mode {
        router = router.route("/dev/events", get(api::dev::handle_events));
    }

    router.with_state(state).layer(TraceLayer::new_for_http())
}
