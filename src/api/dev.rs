//! Dev mode API endpoints.
//!
//! These endpoints are only available when running `swatchgrid dev`.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::server::AppState;

/// SSE endpoint for palette configuration changes
pub async fn handle_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.store.subscribe();

    let stream = BroadcastStream::new(rx).map(|result| match result {
        Ok(change) => Ok(Event::default().event("config-change").data(
            json!({
                "version": change.version,
                "source": change.source.as_str(),
            })
            .to_string(),
        )),
        // Lagged: the client only needs to know it should refresh
        Err(_) => Ok(Event::default().event("config-change").data("lagged")),
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
