//! Handlers for the `/websites` resource (CRUD, scoped to the caller's client).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitewatch_core::error::CoreError;
use sitewatch_core::types::DbId;
use sitewatch_core::validate::{validate_sitename, validate_url};
use sitewatch_db::models::website::{CreateWebsite, UpdateWebsite, Website};
use sitewatch_db::repositories::WebsiteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a website and verify it belongs to the caller's client.
///
/// Websites of other clients are reported as 404, not 403, so ids do not
/// leak across tenants.
pub async fn owned_website(
    state: &AppState,
    client_id: DbId,
    website_id: DbId,
) -> AppResult<Website> {
    let website = WebsiteRepo::get_by_id(&state.pool, website_id)
        .await?
        .filter(|w| w.client_id == client_id)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Website",
                id: website_id,
            })
        })?;
    Ok(website)
}

/// GET /websites
///
/// List all websites owned by the caller's client, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
) -> AppResult<Json<DataResponse<Vec<Website>>>> {
    let websites = WebsiteRepo::list_for_client(&state.pool, user.client_id).await?;
    Ok(Json(DataResponse { data: websites }))
}

/// GET /websites/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Website>>> {
    let website = owned_website(&state, user.client_id, id).await?;
    Ok(Json(DataResponse { data: website }))
}

/// POST /websites
///
/// Create a website. The sitename and URL are validated before persistence;
/// a duplicate sitename within the client maps to 409.
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Json(input): Json<CreateWebsite>,
) -> AppResult<(StatusCode, Json<DataResponse<Website>>)> {
    validate_sitename(&input.name)?;
    validate_url(&input.url)?;

    let website = WebsiteRepo::create(&state.pool, user.client_id, &input).await?;
    tracing::info!(website_id = website.id, name = %website.name, "Website created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: website })))
}

/// PUT /websites/{id}
///
/// Patch a website; omitted fields are left unchanged.
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWebsite>,
) -> AppResult<Json<DataResponse<Website>>> {
    owned_website(&state, user.client_id, id).await?;

    if let Some(name) = &input.name {
        validate_sitename(name)?;
    }
    if let Some(url) = &input.url {
        validate_url(url)?;
    }

    let website = WebsiteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Website",
                id,
            })
        })?;
    Ok(Json(DataResponse { data: website }))
}

/// DELETE /websites/{id}
///
/// Delete a website; statuses, metrics, alerts, threshold, and agent rows
/// cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_website(&state, user.client_id, id).await?;
    WebsiteRepo::delete(&state.pool, id).await?;
    tracing::info!(website_id = id, "Website deleted");
    Ok(StatusCode::NO_CONTENT)
}
