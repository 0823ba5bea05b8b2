//! Repository for the `alerts` table.

use sitewatch_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::alert::{Alert, NewAlert, ObservationRef};

/// Column list for `alerts` queries.
const COLUMNS: &str = "\
    id, website_id, kind, status_check_id, resource_metric_id, \
    is_resolved, created_at, resolved_at";

/// Column list prefixed with the `a` alias, for joined queries.
const ALIASED_COLUMNS: &str = "\
    a.id, a.website_id, a.kind, a.status_check_id, a.resource_metric_id, \
    a.is_resolved, a.created_at, a.resolved_at";

/// Provides query operations for alert episodes.
pub struct AlertRepo;

impl AlertRepo {
    /// Open a new (unresolved) alert row referencing its triggering
    /// observation.
    pub async fn create(pool: &PgPool, dto: &NewAlert) -> Result<Alert, sqlx::Error> {
        let (status_check_id, resource_metric_id) = match dto.observation {
            ObservationRef::StatusCheck(id) => (Some(id), None),
            ObservationRef::ResourceMetric(id) => (None, Some(id)),
        };
        let query = format!(
            "INSERT INTO alerts (website_id, kind, status_check_id, resource_metric_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(dto.website_id)
            .bind(&dto.kind)
            .bind(status_check_id)
            .bind(resource_metric_id)
            .fetch_one(pool)
            .await
    }

    /// All unresolved alerts for (website, kind), newest first.
    pub async fn find_unresolved(
        pool: &PgPool,
        website_id: DbId,
        kind: &str,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE website_id = $1 AND kind = $2 AND NOT is_resolved \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(website_id)
            .bind(kind)
            .fetch_all(pool)
            .await
    }

    /// The most recently opened unresolved alert for (website, kind),
    /// excluding a given alert id.
    ///
    /// Used by the notification throttle: after opening a fresh row, the
    /// caller asks for the previous still-open episode to decide whether a
    /// notification already went out within the window.
    pub async fn latest_unresolved_excluding(
        pool: &PgPool,
        website_id: DbId,
        kind: &str,
        exclude_id: DbId,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE website_id = $1 AND kind = $2 AND NOT is_resolved AND id <> $3 \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(website_id)
            .bind(kind)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve every unresolved alert for (website, kind) in one statement.
    ///
    /// Returns the number of rows transitioned.
    pub async fn resolve_all_unresolved(
        pool: &PgPool,
        website_id: DbId,
        kind: &str,
        resolved_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alerts SET is_resolved = TRUE, resolved_at = $3 \
             WHERE website_id = $1 AND kind = $2 AND NOT is_resolved",
        )
        .bind(website_id)
        .bind(kind)
        .bind(resolved_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// All alerts across a client's websites, newest first.
    pub async fn list_for_client(pool: &PgPool, client_id: DbId) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {ALIASED_COLUMNS} FROM alerts a \
             INNER JOIN websites w ON w.id = a.website_id \
             WHERE w.client_id = $1 \
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }
}
