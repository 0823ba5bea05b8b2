//! Date-range filters for the history read endpoints.

use chrono::Duration;

use crate::types::Timestamp;

/// How far back a history query should reach.
///
/// Parsed from the `filter` query parameter; unknown values fall back to
/// the 7-day default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeFilter {
    /// Last 7 days (the default).
    Days7,
    /// Last month (30 days).
    Month1,
    /// No lower bound.
    All,
}

impl DateRangeFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "1m" => DateRangeFilter::Month1,
            "all" => DateRangeFilter::All,
            _ => DateRangeFilter::Days7,
        }
    }

    /// The inclusive `[start, end]` bounds for this filter, or `None` when
    /// the query should be unbounded.
    pub fn bounds(self, now: Timestamp) -> Option<(Timestamp, Timestamp)> {
        let start = match self {
            DateRangeFilter::Days7 => now - Duration::days(7),
            DateRangeFilter::Month1 => now - Duration::days(30),
            DateRangeFilter::All => return None,
        };
        Some((start, now))
    }
}

impl Default for DateRangeFilter {
    fn default() -> Self {
        DateRangeFilter::Days7
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn parses_known_filters() {
        assert_eq!(DateRangeFilter::parse("7d"), DateRangeFilter::Days7);
        assert_eq!(DateRangeFilter::parse("1m"), DateRangeFilter::Month1);
        assert_eq!(DateRangeFilter::parse("all"), DateRangeFilter::All);
    }

    #[test]
    fn unknown_filter_falls_back_to_default() {
        assert_eq!(DateRangeFilter::parse("14d"), DateRangeFilter::Days7);
        assert_eq!(DateRangeFilter::parse(""), DateRangeFilter::Days7);
    }

    #[test]
    fn bounds_span_the_expected_window() {
        let now = Utc::now();
        let (start, end) = DateRangeFilter::Days7.bounds(now).unwrap();
        assert_eq!(end, now);
        assert_eq!(now - start, Duration::days(7));

        let (start, _) = DateRangeFilter::Month1.bounds(now).unwrap();
        assert_eq!(now - start, Duration::days(30));
    }

    #[test]
    fn all_is_unbounded() {
        assert!(DateRangeFilter::All.bounds(Utc::now()).is_none());
    }
}
