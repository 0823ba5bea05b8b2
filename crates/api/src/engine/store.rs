//! Persistence seam for the alert engine.

use async_trait::async_trait;
use sitewatch_core::types::{DbId, Timestamp};
use sitewatch_db::models::alert::{Alert, NewAlert};
use sitewatch_db::repositories::AlertRepo;
use sitewatch_db::DbPool;

/// The subset of alert persistence the engine needs.
///
/// Production uses [`PgAlertStore`]; tests substitute an in-memory fake.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Insert a new unresolved alert row.
    async fn open(&self, alert: &NewAlert) -> Result<Alert, sqlx::Error>;

    /// The most recently opened unresolved alert for (website, kind),
    /// excluding the given alert id.
    async fn latest_unresolved_excluding(
        &self,
        website_id: DbId,
        kind: &str,
        exclude_id: DbId,
    ) -> Result<Option<Alert>, sqlx::Error>;

    /// All unresolved alerts for (website, kind).
    async fn find_unresolved(&self, website_id: DbId, kind: &str)
        -> Result<Vec<Alert>, sqlx::Error>;

    /// Resolve every unresolved alert for (website, kind); returns the
    /// number of rows transitioned.
    async fn resolve_all_unresolved(
        &self,
        website_id: DbId,
        kind: &str,
        resolved_at: Timestamp,
    ) -> Result<u64, sqlx::Error>;
}

/// PostgreSQL-backed store delegating to [`AlertRepo`].
#[derive(Clone)]
pub struct PgAlertStore {
    pool: DbPool,
}

impl PgAlertStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for PgAlertStore {
    async fn open(&self, alert: &NewAlert) -> Result<Alert, sqlx::Error> {
        AlertRepo::create(&self.pool, alert).await
    }

    async fn latest_unresolved_excluding(
        &self,
        website_id: DbId,
        kind: &str,
        exclude_id: DbId,
    ) -> Result<Option<Alert>, sqlx::Error> {
        AlertRepo::latest_unresolved_excluding(&self.pool, website_id, kind, exclude_id).await
    }

    async fn find_unresolved(
        &self,
        website_id: DbId,
        kind: &str,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        AlertRepo::find_unresolved(&self.pool, website_id, kind).await
    }

    async fn resolve_all_unresolved(
        &self,
        website_id: DbId,
        kind: &str,
        resolved_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        AlertRepo::resolve_all_unresolved(&self.pool, website_id, kind, resolved_at).await
    }
}
