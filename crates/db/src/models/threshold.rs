//! Threshold entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitewatch_core::threshold::ThresholdConfig;
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// The acceptable-bounds configuration for one website (at most one row
/// per website).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Threshold {
    pub id: DbId,
    pub website_id: DbId,
    pub client_id: DbId,
    /// Exact 3-digit code (`"200"`) or inclusive range (`"200-299"`).
    pub http_code: String,
    pub max_response: f64,
    pub max_cpu: Option<f64>,
    pub max_ram: Option<f64>,
    pub max_disk: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Threshold {
    /// The evaluation view of this row, consumed by the core engine.
    pub fn config(&self) -> ThresholdConfig {
        ThresholdConfig {
            http_code: self.http_code.clone(),
            max_response: self.max_response,
            max_cpu: self.max_cpu,
            max_ram: self.max_ram,
            max_disk: self.max_disk,
        }
    }
}

/// DTO for creating a threshold. The resource bounds default to 90 when
/// omitted; an explicit `null` in an update disables the kind.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateThreshold {
    pub http_code: String,
    pub max_response: f64,
    pub max_cpu: Option<f64>,
    pub max_ram: Option<f64>,
    pub max_disk: Option<f64>,
}

/// DTO for replacing a threshold's bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateThreshold {
    pub http_code: String,
    pub max_response: f64,
    pub max_cpu: Option<f64>,
    pub max_ram: Option<f64>,
    pub max_disk: Option<f64>,
}
