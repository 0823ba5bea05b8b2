//! Repository for the `thresholds` table.

use sitewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::threshold::{CreateThreshold, Threshold, UpdateThreshold};

/// Column list for `thresholds` queries.
const COLUMNS: &str = "\
    id, website_id, client_id, http_code, max_response, \
    max_cpu, max_ram, max_disk, created_at, updated_at";

/// Provides CRUD operations for per-website thresholds.
pub struct ThresholdRepo;

impl ThresholdRepo {
    /// Create the threshold for a website.
    ///
    /// The unique index on `website_id` rejects a second configuration for
    /// the same website with a constraint violation.
    pub async fn create(
        pool: &PgPool,
        website_id: DbId,
        client_id: DbId,
        dto: &CreateThreshold,
    ) -> Result<Threshold, sqlx::Error> {
        let query = format!(
            "INSERT INTO thresholds \
                (website_id, client_id, http_code, max_response, max_cpu, max_ram, max_disk) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Threshold>(&query)
            .bind(website_id)
            .bind(client_id)
            .bind(&dto.http_code)
            .bind(dto.max_response)
            .bind(dto.max_cpu)
            .bind(dto.max_ram)
            .bind(dto.max_disk)
            .fetch_one(pool)
            .await
    }

    /// Get the threshold for a website, if configured.
    pub async fn find_by_website(
        pool: &PgPool,
        website_id: DbId,
    ) -> Result<Option<Threshold>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM thresholds WHERE website_id = $1");
        sqlx::query_as::<_, Threshold>(&query)
            .bind(website_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the bounds of a website's threshold.
    ///
    /// A full replace rather than a patch: `None` resource bounds clear
    /// the column, disabling that kind. Returns `None` if the website has
    /// no threshold.
    pub async fn update(
        pool: &PgPool,
        website_id: DbId,
        dto: &UpdateThreshold,
    ) -> Result<Option<Threshold>, sqlx::Error> {
        let query = format!(
            "UPDATE thresholds SET \
                http_code = $2, \
                max_response = $3, \
                max_cpu = $4, \
                max_ram = $5, \
                max_disk = $6, \
                updated_at = NOW() \
             WHERE website_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Threshold>(&query)
            .bind(website_id)
            .bind(&dto.http_code)
            .bind(dto.max_response)
            .bind(dto.max_cpu)
            .bind(dto.max_ram)
            .bind(dto.max_disk)
            .fetch_optional(pool)
            .await
    }

    /// Delete a website's threshold. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, website_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM thresholds WHERE website_id = $1")
            .bind(website_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
