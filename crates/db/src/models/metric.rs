//! Resource metric entity model (append-only).

use serde::{Deserialize, Serialize};
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A persisted agent resource usage sample. Usage fields are percentages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResourceMetric {
    pub id: DbId,
    pub website_id: DbId,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub checked_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting a resource metric row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResourceMetric {
    pub website_id: DbId,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub checked_at: Timestamp,
}
