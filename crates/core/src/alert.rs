//! Monitored condition kinds and the notification throttle decision.
//!
//! An alert tracks one continuous violation episode of a single kind on a
//! single website. The kinds split into two fixed universes depending on
//! what kind of observation is being evaluated: status checks report on
//! liveness and response time, agent metrics report on resource usage.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Minimum interval between repeated notifications for the same
/// (website, kind) while the violation persists.
pub const NOTIFY_THROTTLE: Duration = Duration::from_secs(86_400); // 24 hours

/// A monitored condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// The HTTP status code fell outside the configured code or range.
    StatusAlive,
    /// The response time exceeded the configured maximum.
    ResponseTime,
    /// CPU usage exceeded the configured maximum.
    MaxCpu,
    /// Memory usage exceeded the configured maximum.
    MaxRam,
    /// Disk usage exceeded the configured maximum.
    MaxDisk,
}

/// The fixed universe of kinds evaluated for a status check.
pub const STATUS_KINDS: [AlertKind; 2] = [AlertKind::StatusAlive, AlertKind::ResponseTime];

/// The fixed universe of kinds evaluated for a resource metrics sample.
pub const METRIC_KINDS: [AlertKind; 3] = [AlertKind::MaxCpu, AlertKind::MaxRam, AlertKind::MaxDisk];

impl AlertKind {
    /// Canonical string form, as stored in the `alerts.kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::StatusAlive => "status_alive",
            AlertKind::ResponseTime => "response_time",
            AlertKind::MaxCpu => "max_cpu",
            AlertKind::MaxRam => "max_ram",
            AlertKind::MaxDisk => "max_disk",
        }
    }

    /// Parse the canonical string form. Returns `None` for unknown kinds.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "status_alive" => Some(AlertKind::StatusAlive),
            "response_time" => Some(AlertKind::ResponseTime),
            "max_cpu" => Some(AlertKind::MaxCpu),
            "max_ram" => Some(AlertKind::MaxRam),
            "max_disk" => Some(AlertKind::MaxDisk),
            _ => None,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether a fresh violation should produce a notification.
///
/// `prior_created_at` is the `created_at` of the most recent *other*
/// unresolved alert for the same (website, kind), if any. A notification
/// goes out when there is no prior open episode, or when the prior one was
/// opened at least [`NOTIFY_THROTTLE`] before `now`.
pub fn should_notify(prior_created_at: Option<Timestamp>, now: Timestamp) -> bool {
    match prior_created_at {
        None => true,
        Some(prior) => {
            let elapsed = now.signed_duration_since(prior);
            elapsed.num_seconds() >= NOTIFY_THROTTLE.as_secs() as i64
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn kind_round_trips_through_canonical_string() {
        for kind in STATUS_KINDS.iter().chain(METRIC_KINDS.iter()) {
            assert_eq!(AlertKind::parse(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn unknown_kind_string_is_rejected() {
        assert_eq!(AlertKind::parse("max_gpu"), None);
        assert_eq!(AlertKind::parse(""), None);
    }

    #[test]
    fn notifies_when_no_prior_alert() {
        assert!(should_notify(None, Utc::now()));
    }

    #[test]
    fn suppresses_within_24_hours() {
        let now = Utc::now();
        assert!(!should_notify(Some(now - Duration::hours(1)), now));
        assert!(!should_notify(Some(now - Duration::hours(23)), now));
    }

    #[test]
    fn notifies_at_and_after_24_hours() {
        let now = Utc::now();
        assert!(should_notify(Some(now - Duration::hours(24)), now));
        assert!(should_notify(Some(now - Duration::days(3)), now));
    }
}
