//! Threshold evaluation engine.
//!
//! Pure logic, no database access. The caller is responsible for fetching
//! the website's threshold configuration from the DB and passing it in
//! together with the observation.

use crate::alert::AlertKind;
use crate::observation::{MetricsSample, Observation, StatusSample};

/// Per-website acceptable bounds, as configured by the organization.
///
/// `http_code` and `max_response` are mandatory; the resource bounds are
/// individually optional; `None` means that kind is never evaluated for
/// the website. Fields are assumed pre-validated (see
/// [`crate::validate`]); evaluation never rejects a configuration.
#[derive(Debug, Clone)]
pub struct ThresholdConfig {
    /// Exact 3-digit code (`"200"`) or inclusive range (`"200-299"`).
    pub http_code: String,
    /// Maximum acceptable response time in milliseconds.
    pub max_response: f64,
    pub max_cpu: Option<f64>,
    pub max_ram: Option<f64>,
    pub max_disk: Option<f64>,
}

/// Compare one observation against a threshold configuration and return
/// the kinds currently in violation.
///
/// Pure and deterministic: identical inputs always produce the identical
/// violated-kind set, in the fixed kind order of the observation variant.
pub fn evaluate(observation: &Observation, threshold: &ThresholdConfig) -> Vec<AlertKind> {
    match observation {
        Observation::Status(sample) => evaluate_status(sample, threshold),
        Observation::Metrics(sample) => evaluate_metrics(sample, threshold),
    }
}

fn evaluate_status(sample: &StatusSample, threshold: &ThresholdConfig) -> Vec<AlertKind> {
    let mut violations = Vec::new();

    if !http_code_matches(sample.status_code, &threshold.http_code) {
        violations.push(AlertKind::StatusAlive);
    }

    // Equal is compliant; only a strictly slower response violates.
    if sample.response_time > threshold.max_response {
        violations.push(AlertKind::ResponseTime);
    }

    violations
}

fn evaluate_metrics(sample: &MetricsSample, threshold: &ThresholdConfig) -> Vec<AlertKind> {
    let mut violations = Vec::new();

    if exceeds(sample.cpu_usage, threshold.max_cpu) {
        violations.push(AlertKind::MaxCpu);
    }
    if exceeds(sample.memory_usage, threshold.max_ram) {
        violations.push(AlertKind::MaxRam);
    }
    if exceeds(sample.disk_usage, threshold.max_disk) {
        violations.push(AlertKind::MaxDisk);
    }

    violations
}

/// A `None` bound means the kind is never reported for this website.
fn exceeds(value: f64, bound: Option<f64>) -> bool {
    match bound {
        Some(max) => value > max,
        None => false,
    }
}

/// Check a status code against a configured code or inclusive range.
///
/// The configuration is validated before persistence, so both forms parse
/// here; range bounds themselves are compliant.
fn http_code_matches(status_code: i32, http_code: &str) -> bool {
    match http_code.split_once('-') {
        Some((min, max)) => {
            let min: i32 = min.parse().unwrap_or(0);
            let max: i32 = max.parse().unwrap_or(0);
            status_code >= min && status_code <= max
        }
        None => {
            let expected: i32 = http_code.parse().unwrap_or(0);
            status_code == expected
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn threshold() -> ThresholdConfig {
        ThresholdConfig {
            http_code: "200".to_string(),
            max_response: 500.0,
            max_cpu: Some(90.0),
            max_ram: Some(90.0),
            max_disk: Some(90.0),
        }
    }

    fn status(status_code: i32, response_time: f64) -> Observation {
        Observation::Status(StatusSample {
            website_id: 1,
            status_code,
            response_time,
            page_load: 1.2,
            page_size: 340.0,
            is_up: true,
            checked_at: Utc::now(),
        })
    }

    fn metrics(cpu: f64, ram: f64, disk: f64) -> Observation {
        Observation::Metrics(MetricsSample {
            website_id: 1,
            cpu_usage: cpu,
            memory_usage: ram,
            disk_usage: disk,
            checked_at: Utc::now(),
        })
    }

    #[test]
    fn compliant_status_yields_no_violations() {
        assert!(evaluate(&status(200, 120.0), &threshold()).is_empty());
    }

    #[test]
    fn wrong_code_violates_status_alive() {
        let violations = evaluate(&status(503, 120.0), &threshold());
        assert_eq!(violations, vec![AlertKind::StatusAlive]);
    }

    #[test]
    fn exact_code_match_required_for_single_code() {
        let violations = evaluate(&status(201, 120.0), &threshold());
        assert_eq!(violations, vec![AlertKind::StatusAlive]);
    }

    #[test]
    fn range_bounds_are_compliant() {
        let mut t = threshold();
        t.http_code = "200-299".to_string();
        assert!(evaluate(&status(200, 1.0), &t).is_empty());
        assert!(evaluate(&status(299, 1.0), &t).is_empty());
        assert_eq!(
            evaluate(&status(300, 1.0), &t),
            vec![AlertKind::StatusAlive]
        );
        assert_eq!(
            evaluate(&status(199, 1.0), &t),
            vec![AlertKind::StatusAlive]
        );
    }

    #[test]
    fn response_time_is_strictly_greater_than() {
        // Equal to the bound is compliant.
        assert!(evaluate(&status(200, 500.0), &threshold()).is_empty());
        assert_eq!(
            evaluate(&status(200, 500.1), &threshold()),
            vec![AlertKind::ResponseTime]
        );
    }

    #[test]
    fn slow_down_reports_both_status_kinds() {
        let violations = evaluate(&status(500, 900.0), &threshold());
        assert_eq!(
            violations,
            vec![AlertKind::StatusAlive, AlertKind::ResponseTime]
        );
    }

    #[test]
    fn metrics_violations_are_strict_comparisons() {
        assert!(evaluate(&metrics(90.0, 90.0, 90.0), &threshold()).is_empty());
        assert_eq!(
            evaluate(&metrics(90.1, 50.0, 50.0), &threshold()),
            vec![AlertKind::MaxCpu]
        );
        assert_eq!(
            evaluate(&metrics(50.0, 95.0, 95.0), &threshold()),
            vec![AlertKind::MaxRam, AlertKind::MaxDisk]
        );
    }

    #[test]
    fn null_bound_is_never_violated() {
        // Scenario C: cpu over its bound, ram unbounded even at 99%.
        let t = ThresholdConfig {
            http_code: "200".to_string(),
            max_response: 500.0,
            max_cpu: Some(90.0),
            max_ram: None,
            max_disk: Some(90.0),
        };
        let violations = evaluate(&metrics(95.0, 99.0, 10.0), &t);
        assert_eq!(violations, vec![AlertKind::MaxCpu]);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let obs = status(404, 750.0);
        let t = threshold();
        assert_eq!(evaluate(&obs, &t), evaluate(&obs, &t));
    }
}
