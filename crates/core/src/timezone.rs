//! User-facing timezone conversion.
//!
//! Timestamps are stored in UTC. Read endpoints convert them to the
//! requesting user's IANA timezone for display; a missing or unknown
//! timezone leaves the timestamp in UTC.

use chrono_tz::Tz;

use crate::types::Timestamp;

/// Format used for display timestamps in API responses.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a UTC timestamp in the given user timezone.
///
/// `timezone` is an IANA name like `"Europe/Madrid"`. `None` or an
/// unparseable name falls back to UTC.
pub fn format_in_timezone(at: Timestamp, timezone: Option<&str>) -> String {
    match timezone.and_then(|name| name.parse::<Tz>().ok()) {
        Some(tz) => at.with_timezone(&tz).format(DISPLAY_FORMAT).to_string(),
        None => at.format(DISPLAY_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn noon_utc() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn converts_to_named_timezone() {
        // Madrid is UTC+2 in June (CEST).
        let s = format_in_timezone(noon_utc(), Some("Europe/Madrid"));
        assert_eq!(s, "2025-06-15 14:00:00");
    }

    #[test]
    fn missing_timezone_stays_utc() {
        assert_eq!(format_in_timezone(noon_utc(), None), "2025-06-15 12:00:00");
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let s = format_in_timezone(noon_utc(), Some("Mars/Olympus_Mons"));
        assert_eq!(s, "2025-06-15 12:00:00");
    }
}
