//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sitewatch_core::error::CoreError;
use sitewatch_core::roles::{ROLE_ADMIN, ROLE_AGENT, ROLE_OPERATOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `operator` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn operator_or_admin(RequireOperator(user): RequireOperator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireOperator(pub AuthUser);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_OPERATOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Operator or Admin role required".into(),
            )));
        }
        Ok(RequireOperator(user))
    }
}

/// Requires the `agent` role (machine accounts). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn agents_only(RequireAgent(user): RequireAgent) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAgent(pub AuthUser);

impl FromRequestParts<AppState> for RequireAgent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_AGENT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Agent role required".into(),
            )));
        }
        Ok(RequireAgent(user))
    }
}
