//! Website entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A monitored website, owned by one client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Website {
    pub id: DbId,
    pub client_id: DbId,
    /// Short machine name, unique per client (used by agents to report in).
    pub name: String,
    pub url: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a website.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebsite {
    pub name: String,
    pub url: String,
}

/// DTO for patching a website; `None` fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWebsite {
    pub name: Option<String>,
    pub url: Option<String>,
    pub is_active: Option<bool>,
}
