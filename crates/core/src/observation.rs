//! Observation types: the data points pushed by checkers and agents.

use serde::{Deserialize, Serialize};

use crate::alert::{AlertKind, METRIC_KINDS, STATUS_KINDS};
use crate::types::{DbId, Timestamp};

/// A single HTTP status check result for a website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSample {
    pub website_id: DbId,
    pub status_code: i32,
    /// Response time in milliseconds.
    pub response_time: f64,
    pub page_load: f64,
    pub page_size: f64,
    pub is_up: bool,
    pub checked_at: Timestamp,
}

/// A single resource usage sample reported by a website's agent.
///
/// All usage fields are percentages in `[0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSample {
    pub website_id: DbId,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub checked_at: Timestamp,
}

/// A single monitoring data point, immutable once created.
///
/// The variant determines which [`AlertKind`] universe applies during
/// threshold evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Observation {
    Status(StatusSample),
    Metrics(MetricsSample),
}

impl Observation {
    pub fn website_id(&self) -> DbId {
        match self {
            Observation::Status(s) => s.website_id,
            Observation::Metrics(m) => m.website_id,
        }
    }

    pub fn checked_at(&self) -> Timestamp {
        match self {
            Observation::Status(s) => s.checked_at,
            Observation::Metrics(m) => m.checked_at,
        }
    }

    /// The fixed set of kinds evaluated for this observation variant.
    pub fn monitored_kinds(&self) -> &'static [AlertKind] {
        match self {
            Observation::Status(_) => &STATUS_KINDS,
            Observation::Metrics(_) => &METRIC_KINDS,
        }
    }
}
