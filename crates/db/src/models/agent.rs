//! Agent heartbeat entity model.

use serde::Serialize;
use sitewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// The monitoring agent installed on a website's host (one per website).
///
/// Rows are upserted from the metrics ingestion path: the first sample a
/// website receives marks the agent installed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Agent {
    pub id: DbId,
    pub website_id: DbId,
    pub is_installed: bool,
    pub version: Option<String>,
    pub last_checked_at: Option<Timestamp>,
}
