//! Handlers for the `/alerts` resource (read-only).

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sitewatch_core::timezone::format_in_timezone;
use sitewatch_core::types::DbId;
use sitewatch_db::repositories::{AlertRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// An alert row with timestamps rendered in the caller's timezone.
#[derive(Debug, Serialize)]
pub struct AlertView {
    pub id: DbId,
    pub website_id: DbId,
    pub kind: String,
    pub status_check_id: Option<DbId>,
    pub resource_metric_id: Option<DbId>,
    pub is_resolved: bool,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

/// GET /alerts
///
/// All alerts across the caller's client, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
) -> AppResult<Json<DataResponse<Vec<AlertView>>>> {
    let rows = AlertRepo::list_for_client(&state.pool, user.client_id).await?;

    let timezone = UserRepo::get_by_id(&state.pool, user.user_id)
        .await?
        .and_then(|u| u.timezone);

    let views = rows
        .into_iter()
        .map(|row| AlertView {
            id: row.id,
            website_id: row.website_id,
            kind: row.kind,
            status_check_id: row.status_check_id,
            resource_metric_id: row.resource_metric_id,
            is_resolved: row.is_resolved,
            created_at: format_in_timezone(row.created_at, timezone.as_deref()),
            resolved_at: row
                .resolved_at
                .map(|at| format_in_timezone(at, timezone.as_deref())),
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}
