//! Handlers for the `/websites/{id}/threshold` resource.
//!
//! A website has at most one threshold row. All bounds are validated
//! before persistence; the unique index maps a duplicate create to 409.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitewatch_core::error::CoreError;
use sitewatch_core::types::DbId;
use sitewatch_core::validate::{validate_http_code, validate_max_response, validate_percent};
use sitewatch_db::models::threshold::{CreateThreshold, Threshold, UpdateThreshold};
use sitewatch_db::repositories::ThresholdRepo;

use super::websites::owned_website;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default resource bound applied when a create omits a percentage.
const DEFAULT_RESOURCE_BOUND: f64 = 90.0;

fn validate_bounds(
    http_code: &str,
    max_response: f64,
    max_cpu: Option<f64>,
    max_ram: Option<f64>,
    max_disk: Option<f64>,
) -> Result<(), CoreError> {
    validate_http_code(http_code)?;
    validate_max_response(max_response)?;
    if let Some(v) = max_cpu {
        validate_percent(v, "max_cpu")?;
    }
    if let Some(v) = max_ram {
        validate_percent(v, "max_ram")?;
    }
    if let Some(v) = max_disk {
        validate_percent(v, "max_disk")?;
    }
    Ok(())
}

/// GET /websites/{id}/threshold
pub async fn get(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(website_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Threshold>>> {
    owned_website(&state, user.client_id, website_id).await?;
    let threshold = ThresholdRepo::find_by_website(&state.pool, website_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Threshold",
                id: website_id,
            })
        })?;
    Ok(Json(DataResponse { data: threshold }))
}

/// POST /websites/{id}/threshold
///
/// Create the threshold for a website. Omitted resource bounds default to
/// 90%; a second create for the same website maps to 409.
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(website_id): Path<DbId>,
    Json(mut input): Json<CreateThreshold>,
) -> AppResult<(StatusCode, Json<DataResponse<Threshold>>)> {
    owned_website(&state, user.client_id, website_id).await?;

    input.max_cpu = input.max_cpu.or(Some(DEFAULT_RESOURCE_BOUND));
    input.max_ram = input.max_ram.or(Some(DEFAULT_RESOURCE_BOUND));
    input.max_disk = input.max_disk.or(Some(DEFAULT_RESOURCE_BOUND));

    validate_bounds(
        &input.http_code,
        input.max_response,
        input.max_cpu,
        input.max_ram,
        input.max_disk,
    )?;

    let threshold = ThresholdRepo::create(&state.pool, website_id, user.client_id, &input).await?;
    tracing::info!(website_id, threshold_id = threshold.id, "Threshold created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: threshold })))
}

/// PUT /websites/{id}/threshold
///
/// Replace the bounds of a website's threshold. An explicit `null` resource
/// bound clears it, disabling that kind.
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(website_id): Path<DbId>,
    Json(input): Json<UpdateThreshold>,
) -> AppResult<Json<DataResponse<Threshold>>> {
    owned_website(&state, user.client_id, website_id).await?;

    validate_bounds(
        &input.http_code,
        input.max_response,
        input.max_cpu,
        input.max_ram,
        input.max_disk,
    )?;

    let threshold = ThresholdRepo::update(&state.pool, website_id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Threshold",
                id: website_id,
            })
        })?;
    Ok(Json(DataResponse { data: threshold }))
}

/// DELETE /websites/{id}/threshold
///
/// Remove a website's threshold, disabling evaluation for it entirely.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(website_id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_website(&state, user.client_id, website_id).await?;
    let deleted = ThresholdRepo::delete(&state.pool, website_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Threshold",
            id: website_id,
        }));
    }
    tracing::info!(website_id, "Threshold deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn validate_bounds_accepts_range_and_percents() {
        assert!(validate_bounds("200-299", 800.0, Some(90.0), Some(85.0), None).is_ok());
    }

    #[test]
    fn validate_bounds_rejects_bad_percent() {
        let err = validate_bounds("200", 800.0, Some(100.0), None, None).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }
}
