//! Alert entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One continuous violation episode of a single kind on a single website.
///
/// Exactly one of `status_check_id` / `resource_metric_id` is set,
/// referencing the observation that opened the episode. The transition
/// open -> resolved is terminal; a later violation opens a new row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub website_id: DbId,
    /// Canonical kind string (see `sitewatch_core::alert::AlertKind`).
    pub kind: String,
    pub status_check_id: Option<DbId>,
    pub resource_metric_id: Option<DbId>,
    pub is_resolved: bool,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// Reference to the observation that triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ObservationRef {
    StatusCheck(DbId),
    ResourceMetric(DbId),
}

/// DTO for opening a new alert row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlert {
    pub website_id: DbId,
    pub kind: String,
    pub observation: ObservationRef,
}
