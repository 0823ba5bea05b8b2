//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A member of an organization.
///
/// `notification_email` is the address alert emails are sent to; `None`
/// excludes the user from alert notifications entirely.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub client_id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    /// IANA timezone name used for display timestamps (e.g. `Europe/Madrid`).
    pub timezone: Option<String>,
    pub notification_email: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user (password already hashed).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub client_id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub timezone: Option<String>,
    pub notification_email: Option<String>,
}
