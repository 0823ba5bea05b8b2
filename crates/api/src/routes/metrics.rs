//! Route definitions for resource metric ingestion and history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::metrics;
use crate::state::AppState;

/// Routes mounted at `/metrics`.
///
/// ```text
/// POST /                          -> report (agent)
/// GET  /getbyhost/{websiteId}     -> history_by_host
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(metrics::report))
        .route("/getbyhost/{websiteId}", get(metrics::history_by_host))
}
