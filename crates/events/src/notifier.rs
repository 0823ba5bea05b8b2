//! Delivery seam between the alert engine and the outside world.
//!
//! The engine decides *when* a notification goes out; implementations of
//! [`AlertNotifier`] decide *how*. Delivery failures are reported through
//! [`NotifyError`] and are expected to be logged rather than propagated by
//! the caller, so a broken SMTP relay never blocks alert bookkeeping.

use async_trait::async_trait;
use sitewatch_core::alert::AlertKind;
use sitewatch_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// Recipient lookup against the database failed.
    #[error("Recipient lookup error: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// AlertEvent
// ---------------------------------------------------------------------------

/// Everything a delivery channel needs to describe one alert transition.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    /// Website the alert belongs to.
    pub website_id: DbId,
    /// Client that owns the website; recipients are resolved from its
    /// active members.
    pub client_id: DbId,
    /// Short site name, used in message bodies.
    pub sitename: String,
    /// Monitored URL, used in message subjects.
    pub url: String,
    /// Which bound was crossed (or recovered).
    pub kind: AlertKind,
    /// When the triggering observation was taken.
    pub checked_at: Timestamp,
}

// ---------------------------------------------------------------------------
// AlertNotifier
// ---------------------------------------------------------------------------

/// Outbound delivery channel for alert notifications.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Announce a newly detected violation.
    async fn send_alert(&self, event: &AlertEvent) -> Result<(), NotifyError>;

    /// Announce that a previously alerting kind has recovered.
    async fn send_recovery(&self, event: &AlertEvent) -> Result<(), NotifyError>;
}

// ---------------------------------------------------------------------------
// LogNotifier
// ---------------------------------------------------------------------------

/// Fallback notifier used when SMTP is not configured.
///
/// Writes each notification to the log at `warn` (alerts) or `info`
/// (recoveries) and always succeeds.
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    async fn send_alert(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        tracing::warn!(
            website_id = event.website_id,
            sitename = %event.sitename,
            kind = %event.kind,
            checked_at = %event.checked_at,
            "Alert detected (email delivery not configured)"
        );
        Ok(())
    }

    async fn send_recovery(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        tracing::info!(
            website_id = event.website_id,
            sitename = %event.sitename,
            kind = %event.kind,
            checked_at = %event.checked_at,
            "Alert restored (email delivery not configured)"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> AlertEvent {
        AlertEvent {
            website_id: 1,
            client_id: 1,
            sitename: "prod-web".to_string(),
            url: "https://example.com".to_string(),
            kind: AlertKind::MaxCpu,
            checked_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn log_notifier_never_fails() {
        let event = sample_event();
        assert!(LogNotifier.send_alert(&event).await.is_ok());
        assert!(LogNotifier.send_recovery(&event).await.is_ok());
    }

    #[test]
    fn notify_error_display_build() {
        let err = NotifyError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn notify_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = NotifyError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
