//! Handlers for resource metric ingestion and history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sitewatch_core::daterange::DateRangeFilter;
use sitewatch_core::error::CoreError;
use sitewatch_core::observation::{MetricsSample, Observation};
use sitewatch_core::threshold::evaluate;
use sitewatch_core::timezone::format_in_timezone;
use sitewatch_core::types::{DbId, Timestamp};
use sitewatch_db::models::alert::ObservationRef;
use sitewatch_db::models::metric::CreateResourceMetric;
use sitewatch_db::repositories::{AgentRepo, MetricRepo, ThresholdRepo, UserRepo, WebsiteRepo};

use super::status::HistoryQuery;
use super::websites::owned_website;
use crate::engine::{AlertEngine, PgAlertStore};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAgent, RequireOperator};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /metrics`, submitted by monitoring agents.
#[derive(Debug, Deserialize)]
pub struct MetricsReport {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    /// Agent crate version, recorded on the heartbeat.
    pub version: String,
    /// Per-client unique site name the agent reports for.
    pub sitename: String,
}

/// A metric row with its timestamp rendered in the caller's timezone.
#[derive(Debug, Serialize)]
pub struct ResourceMetricView {
    pub id: DbId,
    pub website_id: DbId,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub checked_at: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Rejection for a sitename that does not resolve within the caller's
/// client. Websites of other clients resolve the same way, so the agent
/// cannot distinguish foreign sites from nonexistent ones.
fn reporting_forbidden(sitename: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(format!(
        "Not allowed to report for site '{sitename}'"
    )))
}

/// POST /metrics
///
/// Ingest one resource sample from an agent. The website is resolved by
/// sitename within the caller's client (403 when it does not resolve
/// there), the agent heartbeat is upserted, and the sample is evaluated
/// against the website's threshold (when one exists) and reconciled
/// against open alerts.
pub async fn report(
    State(state): State<AppState>,
    RequireAgent(user): RequireAgent,
    Json(input): Json<MetricsReport>,
) -> AppResult<(StatusCode, Json<DataResponse<BatchAck>>)> {
    let website = WebsiteRepo::find_by_name(&state.pool, user.client_id, &input.sitename)
        .await?
        .ok_or_else(|| reporting_forbidden(&input.sitename))?;

    let checked_at: Timestamp = Utc::now();

    let row = MetricRepo::insert(
        &state.pool,
        &CreateResourceMetric {
            website_id: website.id,
            cpu_usage: input.cpu_usage,
            memory_usage: input.memory_usage,
            disk_usage: input.disk_usage,
            checked_at,
        },
    )
    .await?;

    AgentRepo::mark_seen(&state.pool, website.id, &input.version, checked_at).await?;

    if let Some(threshold) = ThresholdRepo::find_by_website(&state.pool, website.id).await? {
        let observation = Observation::Metrics(MetricsSample {
            website_id: website.id,
            cpu_usage: row.cpu_usage,
            memory_usage: row.memory_usage,
            disk_usage: row.disk_usage,
            checked_at: row.checked_at,
        });
        let violated = evaluate(&observation, &threshold.config());

        let engine =
            AlertEngine::new(PgAlertStore::new(state.pool.clone()), state.notifier.clone());
        engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::ResourceMetric(row.id),
                &violated,
            )
            .await?;
    }

    tracing::debug!(website_id = website.id, metric_id = row.id, "Metric sample ingested");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BatchAck { id: row.id },
        }),
    ))
}

/// Acknowledgement payload for metric ingestion.
#[derive(Debug, Serialize)]
pub struct BatchAck {
    /// Id of the persisted metric row.
    pub id: DbId,
}

/// GET /metrics/getbyhost/{websiteId}
///
/// Metric history for a website. Only available once the website's agent
/// has reported in (`is_installed`); 404 otherwise.
pub async fn history_by_host(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(website_id): Path<DbId>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<ResourceMetricView>>>> {
    owned_website(&state, user.client_id, website_id).await?;

    let installed = AgentRepo::get_by_website(&state.pool, website_id)
        .await?
        .map(|a| a.is_installed)
        .unwrap_or(false);
    if !installed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Agent",
            id: website_id,
        }));
    }

    let filter = DateRangeFilter::parse(query.filter.as_deref().unwrap_or_default());
    let rows = MetricRepo::list_for_website(&state.pool, website_id, filter).await?;

    let timezone = UserRepo::get_by_id(&state.pool, user.user_id)
        .await?
        .and_then(|u| u.timezone);

    let views = rows
        .into_iter()
        .map(|row| ResourceMetricView {
            id: row.id,
            website_id: row.website_id,
            cpu_usage: row.cpu_usage,
            memory_usage: row.memory_usage,
            disk_usage: row.disk_usage,
            checked_at: format_in_timezone(row.checked_at, timezone.as_deref()),
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn unresolved_sitename_is_forbidden() {
        let err = reporting_forbidden("web-1");
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
