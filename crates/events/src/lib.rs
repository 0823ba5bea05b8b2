//! Sitewatch notification infrastructure.
//!
//! This crate carries alert notifications out of the monitoring backend:
//!
//! - [`AlertNotifier`]: the delivery seam the alert engine talks to.
//! - [`AlertMailer`]: SMTP delivery via `lettre`, fanning out to every
//!   active member of the owning client.
//! - [`LogNotifier`]: log-only fallback used when SMTP is not configured.

pub mod mailer;
pub mod notifier;

pub use mailer::{AlertMailer, EmailConfig, PgRecipientSource, RecipientSource};
pub use notifier::{AlertEvent, AlertNotifier, LogNotifier, NotifyError};
