//! Route definitions for website CRUD and per-website thresholds.

use axum::routing::get;
use axum::Router;

use crate::handlers::{threshold, websites};
use crate::state::AppState;

/// Routes mounted at `/websites`.
///
/// All routes require the `operator` or `admin` role (enforced by handler
/// extractors).
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/threshold    -> threshold::get
/// POST   /{id}/threshold    -> threshold::create
/// PUT    /{id}/threshold    -> threshold::update
/// DELETE /{id}/threshold    -> threshold::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(websites::list).post(websites::create))
        .route(
            "/{id}",
            get(websites::get)
                .put(websites::update)
                .delete(websites::delete),
        )
        .route(
            "/{id}/threshold",
            get(threshold::get)
                .post(threshold::create)
                .put(threshold::update)
                .delete(threshold::delete),
        )
}
