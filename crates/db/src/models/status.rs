//! Status check entity model (append-only).

use serde::{Deserialize, Serialize};
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A persisted HTTP status check result.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCheck {
    pub id: DbId,
    pub website_id: DbId,
    pub status_code: i32,
    /// Response time in milliseconds.
    pub response_time: f64,
    pub page_load: f64,
    pub page_size: f64,
    pub is_up: bool,
    pub checked_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting a status check row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStatusCheck {
    pub website_id: DbId,
    pub status_code: i32,
    pub response_time: f64,
    pub page_load: f64,
    pub page_size: f64,
    pub is_up: bool,
    pub checked_at: Timestamp,
}
