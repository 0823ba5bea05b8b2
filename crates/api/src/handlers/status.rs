//! Handlers for status check ingestion and history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sitewatch_core::daterange::DateRangeFilter;
use sitewatch_core::observation::{Observation, StatusSample};
use sitewatch_core::threshold::evaluate;
use sitewatch_core::timezone::format_in_timezone;
use sitewatch_core::types::{DbId, Timestamp};
use sitewatch_db::models::alert::ObservationRef;
use sitewatch_db::models::status::CreateStatusCheck;
use sitewatch_db::repositories::{StatusRepo, ThresholdRepo, UserRepo};

use super::websites::owned_website;
use crate::engine::{AlertEngine, PgAlertStore};
use crate::error::AppResult;
use crate::middleware::rbac::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One status sample in a `POST /status/setall` batch.
///
/// Field names are camelCase on the wire, matching what the uptime checker
/// submits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSampleInput {
    pub website_id: DbId,
    pub status_code: i32,
    pub response_time: f64,
    pub page_load: f64,
    pub page_size: f64,
    pub is_up: bool,
    pub checked_at: Timestamp,
}

/// Response payload for the batch endpoint.
#[derive(Debug, Serialize)]
pub struct BatchResult {
    /// Number of samples persisted.
    pub accepted: usize,
}

/// Query parameters for history endpoints.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Date-range filter: `7d` (default), `1m`, or `all`.
    pub filter: Option<String>,
}

/// A status check row with its timestamp rendered in the caller's timezone.
#[derive(Debug, Serialize)]
pub struct StatusCheckView {
    pub id: DbId,
    pub website_id: DbId,
    pub status_code: i32,
    pub response_time: f64,
    pub page_load: f64,
    pub page_size: f64,
    pub is_up: bool,
    pub checked_at: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /status/setall
///
/// Ingest a batch of status samples. Samples are processed sequentially in
/// input order: each is persisted, then evaluated against the website's
/// threshold (when one exists) and reconciled against open alerts. A
/// website with no threshold gets its history row and nothing else.
pub async fn set_all(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Json(samples): Json<Vec<StatusSampleInput>>,
) -> AppResult<(StatusCode, Json<DataResponse<BatchResult>>)> {
    let engine = AlertEngine::new(PgAlertStore::new(state.pool.clone()), state.notifier.clone());
    let mut accepted = 0;

    for sample in &samples {
        let website = owned_website(&state, user.client_id, sample.website_id).await?;

        let row = StatusRepo::insert(
            &state.pool,
            &CreateStatusCheck {
                website_id: website.id,
                status_code: sample.status_code,
                response_time: sample.response_time,
                page_load: sample.page_load,
                page_size: sample.page_size,
                is_up: sample.is_up,
                checked_at: sample.checked_at,
            },
        )
        .await?;
        accepted += 1;

        let Some(threshold) = ThresholdRepo::find_by_website(&state.pool, website.id).await? else {
            continue;
        };

        let observation = Observation::Status(StatusSample {
            website_id: website.id,
            status_code: row.status_code,
            response_time: row.response_time,
            page_load: row.page_load,
            page_size: row.page_size,
            is_up: row.is_up,
            checked_at: row.checked_at,
        });
        let violated = evaluate(&observation, &threshold.config());

        engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::StatusCheck(row.id),
                &violated,
            )
            .await?;
    }

    tracing::info!(accepted, "Status batch ingested");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BatchResult { accepted },
        }),
    ))
}

/// GET /status/{websiteId}
///
/// Status history for a website, date-range filtered, oldest first, with
/// `checked_at` rendered in the caller's stored timezone.
pub async fn history(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(website_id): Path<DbId>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<StatusCheckView>>>> {
    owned_website(&state, user.client_id, website_id).await?;

    let filter = DateRangeFilter::parse(query.filter.as_deref().unwrap_or_default());
    let rows = StatusRepo::list_for_website(&state.pool, website_id, filter).await?;

    let timezone = UserRepo::get_by_id(&state.pool, user.user_id)
        .await?
        .and_then(|u| u.timezone);

    let views = rows
        .into_iter()
        .map(|row| StatusCheckView {
            id: row.id,
            website_id: row.website_id,
            status_code: row.status_code,
            response_time: row.response_time,
            page_load: row.page_load,
            page_size: row.page_size,
            is_up: row.is_up,
            checked_at: format_in_timezone(row.checked_at, timezone.as_deref()),
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}
