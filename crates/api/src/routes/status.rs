//! Route definitions for status check ingestion and history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// Routes mounted at `/status`.
///
/// ```text
/// POST /setall         -> set_all (operator)
/// GET  /{websiteId}    -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/setall", post(status::set_all))
        .route("/{websiteId}", get(status::history))
}
