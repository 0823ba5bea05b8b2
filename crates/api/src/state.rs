use std::sync::Arc;

use sitewatch_events::AlertNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sitewatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound notification channel (SMTP when configured, log fallback
    /// otherwise).
    pub notifier: Arc<dyn AlertNotifier>,
}
