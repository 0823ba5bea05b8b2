//! Repository for the `agents` table.

use sitewatch_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::agent::Agent;

/// Column list for `agents` queries.
const COLUMNS: &str = "id, website_id, is_installed, version, last_checked_at";

/// Provides query operations for agent heartbeats.
pub struct AgentRepo;

impl AgentRepo {
    /// Get the agent row for a website, if any.
    pub async fn get_by_website(
        pool: &PgPool,
        website_id: DbId,
    ) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE website_id = $1");
        sqlx::query_as::<_, Agent>(&query)
            .bind(website_id)
            .fetch_optional(pool)
            .await
    }

    /// Record an agent heartbeat, upserting on the website unique index.
    ///
    /// Marks the agent installed and refreshes its reported version and
    /// last-seen timestamp.
    pub async fn mark_seen(
        pool: &PgPool,
        website_id: DbId,
        version: &str,
        seen_at: Timestamp,
    ) -> Result<Agent, sqlx::Error> {
        let query = format!(
            "INSERT INTO agents (website_id, is_installed, version, last_checked_at) \
             VALUES ($1, TRUE, $2, $3) \
             ON CONFLICT (website_id) \
             DO UPDATE SET \
                is_installed = TRUE, \
                version = EXCLUDED.version, \
                last_checked_at = EXCLUDED.last_checked_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(website_id)
            .bind(version)
            .bind(seen_at)
            .fetch_one(pool)
            .await
    }
}
