//! Field-level validity predicates for thresholds and websites.
//!
//! These run at create/update time, before persistence. Evaluation
//! ([`crate::threshold`]) assumes its inputs already passed these checks.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

fn single_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{3}$").expect("valid regex"))
}

fn code_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{3})-(\d{3})$").expect("valid regex"))
}

fn sitename_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex"))
}

/// Validate a threshold HTTP code expression.
///
/// Accepts a single 3-digit code in `[100, 599]`, or an inclusive range
/// `"min-max"` with `min >= 100`, `max <= 599`, and `min <= max`.
pub fn validate_http_code(value: &str) -> Result<(), CoreError> {
    if single_code_re().is_match(value) {
        let code: i32 = value.parse().expect("3 digits");
        if (100..=599).contains(&code) {
            return Ok(());
        }
    }

    if let Some(caps) = code_range_re().captures(value) {
        let start: i32 = caps[1].parse().expect("3 digits");
        let end: i32 = caps[2].parse().expect("3 digits");
        if start >= 100 && end <= 599 && start <= end {
            return Ok(());
        }
    }

    Err(CoreError::Validation(format!(
        "http_code must be a 3-digit status code or range between 100 and 599, got {value:?}"
    )))
}

/// Validate a maximum response time: finite and strictly positive.
pub fn validate_max_response(value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "max_response must be greater than 0, got {value}"
        )));
    }
    Ok(())
}

/// Validate a resource usage bound (max_cpu / max_ram / max_disk): `[1, 99]`.
///
/// Returns a `CoreError::Validation` naming the field if out of range.
pub fn validate_percent(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || !(1.0..=99.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 1 and 99, got {value}"
        )));
    }
    Ok(())
}

/// Validate a website name: alphanumerics, underscore, and hyphen only.
pub fn validate_sitename(value: &str) -> Result<(), CoreError> {
    if value.is_empty() || !sitename_re().is_match(value) {
        return Err(CoreError::Validation(format!(
            "name may only contain letters, digits, '_' and '-', got {value:?}"
        )));
    }
    Ok(())
}

/// Validate a website URL: http(s) scheme and a dotted hostname.
pub fn validate_url(value: &str) -> Result<(), CoreError> {
    if !url_re().is_match(value) {
        return Err(CoreError::Validation(format!(
            "url must be of the form http(s)://host.tld, got {value:?}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_codes_in_range() {
        assert!(validate_http_code("100").is_ok());
        assert!(validate_http_code("200").is_ok());
        assert!(validate_http_code("599").is_ok());
    }

    #[test]
    fn rejects_single_codes_out_of_range() {
        assert!(validate_http_code("099").is_err());
        assert!(validate_http_code("600").is_err());
    }

    #[test]
    fn accepts_well_formed_ranges() {
        assert!(validate_http_code("200-299").is_ok());
        assert!(validate_http_code("100-599").is_ok());
        assert!(validate_http_code("200-200").is_ok());
    }

    #[test]
    fn rejects_inverted_or_out_of_range_ranges() {
        assert!(validate_http_code("299-200").is_err());
        assert!(validate_http_code("200-600").is_err());
        assert!(validate_http_code("099-200").is_err());
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(validate_http_code("").is_err());
        assert!(validate_http_code("2xx").is_err());
        assert!(validate_http_code("20").is_err());
        assert!(validate_http_code("200-").is_err());
        assert!(validate_http_code("200-29").is_err());
        assert!(validate_http_code("200 - 299").is_err());
    }

    #[test]
    fn max_response_must_be_positive() {
        assert!(validate_max_response(0.1).is_ok());
        assert!(validate_max_response(5000.0).is_ok());
        assert!(validate_max_response(0.0).is_err());
        assert!(validate_max_response(-10.0).is_err());
        assert!(validate_max_response(f64::NAN).is_err());
    }

    #[test]
    fn percent_boundaries() {
        assert!(validate_percent(1.0, "max_cpu").is_ok());
        assert!(validate_percent(99.0, "max_cpu").is_ok());
        assert!(validate_percent(0.9, "max_cpu").is_err());
        assert!(validate_percent(99.1, "max_cpu").is_err());
    }

    #[test]
    fn percent_error_names_the_field() {
        let err = validate_percent(0.0, "max_disk").unwrap_err();
        assert!(err.to_string().contains("max_disk"));
    }

    #[test]
    fn sitename_rules() {
        assert!(validate_sitename("my-site_01").is_ok());
        assert!(validate_sitename("").is_err());
        assert!(validate_sitename("my site").is_err());
        assert!(validate_sitename("site!").is_err());
    }

    #[test]
    fn url_rules() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://sub.example.co").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("https://nodot").is_err());
        assert!(validate_url("example.com").is_err());
    }
}
