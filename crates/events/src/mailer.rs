//! Email notification delivery via SMTP.
//!
//! [`AlertMailer`] wraps the `lettre` async SMTP transport to send plain-text
//! alert emails to every active member of the client that owns the affected
//! website. Configuration is loaded from environment variables; if
//! `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `None` and the
//! caller should fall back to [`LogNotifier`](crate::LogNotifier).

use async_trait::async_trait;
use sitewatch_core::timezone::format_in_timezone;
use sitewatch_core::types::DbId;
use sitewatch_db::repositories::ClientRepo;
use sitewatch_db::DbPool;

use crate::notifier::{AlertEvent, AlertNotifier, NotifyError};

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@sitewatch.local";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | —                          |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `noreply@sitewatch.local`  |
    /// | `SMTP_USER`     | no       | —                          |
    /// | `SMTP_PASSWORD` | no       | —                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// RecipientSource
// ---------------------------------------------------------------------------

/// Recipient lookup seam for the mailer.
///
/// Production uses [`PgRecipientSource`]; tests substitute a fixed list.
#[async_trait]
pub trait RecipientSource: Send + Sync {
    /// `(email, preferred timezone)` pairs for a client's active members
    /// that have a notification address configured.
    async fn notification_recipients(
        &self,
        client_id: DbId,
    ) -> Result<Vec<(String, Option<String>)>, NotifyError>;
}

/// PostgreSQL-backed recipient lookup delegating to [`ClientRepo`].
pub struct PgRecipientSource {
    pool: DbPool,
}

impl PgRecipientSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipientSource for PgRecipientSource {
    async fn notification_recipients(
        &self,
        client_id: DbId,
    ) -> Result<Vec<(String, Option<String>)>, NotifyError> {
        Ok(ClientRepo::notification_recipients(&self.pool, client_id).await?)
    }
}

// ---------------------------------------------------------------------------
// AlertMailer
// ---------------------------------------------------------------------------

/// Sends alert and recovery emails via SMTP.
///
/// Recipients are resolved per event from the owning client's active
/// members, and the observation time in each message is rendered in the
/// recipient's preferred timezone.
pub struct AlertMailer<R: RecipientSource> {
    recipients: R,
    config: EmailConfig,
}

impl<R: RecipientSource> AlertMailer<R> {
    /// Create a new mailer with the given recipient source and configuration.
    pub fn new(recipients: R, config: EmailConfig) -> Self {
        Self { recipients, config }
    }

    /// Send one email per active recipient of the owning client.
    ///
    /// An empty recipient list is not an error: the event is logged and
    /// delivery is skipped. A failed delivery is logged and the remaining
    /// recipients are still attempted; an error is returned only when every
    /// delivery failed.
    async fn fan_out(&self, event: &AlertEvent, transition: &str) -> Result<(), NotifyError> {
        let recipients = self
            .recipients
            .notification_recipients(event.client_id)
            .await?;
        if recipients.is_empty() {
            tracing::warn!(
                website_id = event.website_id,
                client_id = event.client_id,
                "No notification recipients configured, skipping email delivery"
            );
            return Ok(());
        }

        let mut delivered = 0usize;
        let mut last_error = None;
        for (email, timezone) in &recipients {
            let checked_at = format_in_timezone(event.checked_at, timezone.as_deref());
            let subject = format!(
                "Alert {transition} for host: {url} at {checked_at}",
                url = event.url
            );
            let body = format!(
                "Site: {sitename}\nURL: {url}\nCondition: {kind}\nObserved: {checked_at}",
                sitename = event.sitename,
                url = event.url,
                kind = event.kind
            );
            match self.deliver(email, &subject, body).await {
                Ok(()) => delivered += 1,
                Err(err) => {
                    tracing::error!(
                        website_id = event.website_id,
                        recipient = %email,
                        error = %err,
                        "Notification email failed"
                    );
                    last_error = Some(err);
                }
            }
        }

        tracing::info!(
            website_id = event.website_id,
            kind = %event.kind,
            delivered,
            attempted = recipients.len(),
            "Notification fan-out finished"
        );
        fan_out_result(delivered, last_error)
    }

    /// Send a single plain-text message.
    async fn deliver(&self, to_email: &str, subject: &str, body: String) -> Result<(), NotifyError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;
        Ok(())
    }
}

/// Any successful delivery counts as success; the last error is propagated
/// only when every attempt failed.
fn fan_out_result(delivered: usize, last_error: Option<NotifyError>) -> Result<(), NotifyError> {
    match last_error {
        Some(err) if delivered == 0 => Err(err),
        _ => Ok(()),
    }
}

#[async_trait]
impl<R: RecipientSource> AlertNotifier for AlertMailer<R> {
    async fn send_alert(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        self.fan_out(event, "detected").await
    }

    async fn send_recovery(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        self.fan_out(event, "restored").await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sitewatch_core::alert::AlertKind;

    use super::*;

    /// Recipient source returning a fixed list.
    struct StaticRecipients {
        list: Vec<(String, Option<String>)>,
    }

    #[async_trait]
    impl RecipientSource for StaticRecipients {
        async fn notification_recipients(
            &self,
            _client_id: DbId,
        ) -> Result<Vec<(String, Option<String>)>, NotifyError> {
            Ok(self.list.clone())
        }
    }

    fn mailer_with(list: Vec<(String, Option<String>)>) -> AlertMailer<StaticRecipients> {
        AlertMailer::new(
            StaticRecipients { list },
            EmailConfig {
                smtp_host: "localhost".to_string(),
                smtp_port: DEFAULT_SMTP_PORT,
                from_address: DEFAULT_FROM_ADDRESS.to_string(),
                smtp_user: None,
                smtp_password: None,
            },
        )
    }

    fn sample_event() -> AlertEvent {
        AlertEvent {
            website_id: 1,
            client_id: 3,
            sitename: "prod-web".to_string(),
            url: "https://example.com".to_string(),
            kind: AlertKind::MaxCpu,
            checked_at: Utc::now(),
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[tokio::test]
    async fn empty_recipient_list_is_a_noop() {
        let mailer = mailer_with(Vec::new());
        let event = sample_event();

        // No recipients means no SMTP traffic and no error, for both
        // transitions.
        assert!(mailer.send_alert(&event).await.is_ok());
        assert!(mailer.send_recovery(&event).await.is_ok());
    }

    #[test]
    fn partial_delivery_failure_is_not_fatal() {
        let result = fan_out_result(2, Some(NotifyError::Build("boom".to_string())));
        assert!(result.is_ok());
    }

    #[test]
    fn total_delivery_failure_propagates() {
        let result = fan_out_result(0, Some(NotifyError::Build("boom".to_string())));
        assert!(result.is_err());
    }

    #[test]
    fn all_deliveries_succeeding_is_ok() {
        assert!(fan_out_result(3, None).is_ok());
    }
}
