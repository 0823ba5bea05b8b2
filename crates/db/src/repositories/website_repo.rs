//! Repository for the `websites` table.

use sitewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::website::{CreateWebsite, UpdateWebsite, Website};

/// Column list for `websites` queries.
const COLUMNS: &str = "id, client_id, name, url, is_active, created_at, updated_at";

/// Provides CRUD operations for websites.
pub struct WebsiteRepo;

impl WebsiteRepo {
    /// Create a website owned by the given client.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        dto: &CreateWebsite,
    ) -> Result<Website, sqlx::Error> {
        let query = format!(
            "INSERT INTO websites (client_id, name, url) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Website>(&query)
            .bind(client_id)
            .bind(&dto.name)
            .bind(&dto.url)
            .fetch_one(pool)
            .await
    }

    /// Get a single website by ID.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<Website>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM websites WHERE id = $1");
        sqlx::query_as::<_, Website>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all websites owned by a client, newest first.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Website>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM websites WHERE client_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Website>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Find a website by its per-client unique name.
    ///
    /// Used by the metrics ingestion path, where agents identify their
    /// website by sitename rather than ID.
    pub async fn find_by_name(
        pool: &PgPool,
        client_id: DbId,
        name: &str,
    ) -> Result<Option<Website>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM websites WHERE client_id = $1 AND name = $2");
        sqlx::query_as::<_, Website>(&query)
            .bind(client_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Patch a website. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateWebsite,
    ) -> Result<Option<Website>, sqlx::Error> {
        let query = format!(
            "UPDATE websites SET \
                name = COALESCE($2, name), \
                url = COALESCE($3, url), \
                is_active = COALESCE($4, is_active), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Website>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.url)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a website (cascades observations, alerts, threshold, agent).
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
