//! Organization ("client") entity model.

use serde::{Deserialize, Serialize};
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An organization owning websites, users, and thresholds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub name: String,
}
