//! Axum router serving the display summary.
//!
//! Every request runs its own controller session; the shared state is
//! read-only.

mod error;
mod query;

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use glowsq_config::GraphSection;
use glowsq_core::{ClockZone, Controller};

pub use error::ApiError;
pub use query::DisplayQuery;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Immutable state shared by all requests.
#[derive(Debug)]
pub struct AppState {
    controller: Controller,
    graph: GraphSection,
    zone: ClockZone,
}

impl AppState {
    pub fn new(controller: Controller, graph: GraphSection, zone: ClockZone) -> Arc<Self> {
        Arc::new(Self {
            controller,
            graph,
            zone,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(stats))
        .route("/stats", get(stats))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Summary for the display, sized by `width`/`height`.
async fn stats(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    let options = DisplayQuery::parse(raw.as_deref()).options(&state.graph);
    let summary = state.controller.summarize(&options, state.zone).await?;
    let body = serde_json::to_vec(&summary)?;
    Ok(json_response(StatusCode::OK, body))
}

/// Liveness probe; never touches the controller.
async fn health() -> &'static str {
    "OK"
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    response
}
