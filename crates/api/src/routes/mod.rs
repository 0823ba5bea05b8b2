pub mod alerts;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod status;
pub mod websites;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
///
/// /websites                         list, create
/// /websites/{id}                    get, update, delete
/// /websites/{id}/threshold          get, create, update, delete
///
/// /status/setall                    batch ingestion (operator)
/// /status/{websiteId}               status history
///
/// /metrics                          agent sample ingestion (agent)
/// /metrics/getbyhost/{websiteId}    metric history
///
/// /alerts                           alert list for the caller's client
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/websites", websites::router())
        .nest("/status", status::router())
        .nest("/metrics", metrics::router())
        .nest("/alerts", alerts::router())
}
