//! Repository for the `resource_metrics` table.

use sitewatch_core::daterange::DateRangeFilter;
use sitewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::metric::{CreateResourceMetric, ResourceMetric};

/// Column list for `resource_metrics` queries.
const COLUMNS: &str = "\
    id, website_id, cpu_usage, memory_usage, disk_usage, checked_at, created_at";

/// Provides query operations for resource metric history.
pub struct MetricRepo;

impl MetricRepo {
    /// Insert a new resource metric row.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateResourceMetric,
    ) -> Result<ResourceMetric, sqlx::Error> {
        let query = format!(
            "INSERT INTO resource_metrics \
                (website_id, cpu_usage, memory_usage, disk_usage, checked_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResourceMetric>(&query)
            .bind(dto.website_id)
            .bind(dto.cpu_usage)
            .bind(dto.memory_usage)
            .bind(dto.disk_usage)
            .bind(dto.checked_at)
            .fetch_one(pool)
            .await
    }

    /// List metric history for a website within the date-range filter,
    /// oldest first.
    pub async fn list_for_website(
        pool: &PgPool,
        website_id: DbId,
        filter: DateRangeFilter,
    ) -> Result<Vec<ResourceMetric>, sqlx::Error> {
        match filter.bounds(chrono::Utc::now()) {
            Some((start, end)) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM resource_metrics \
                     WHERE website_id = $1 AND checked_at BETWEEN $2 AND $3 \
                     ORDER BY checked_at"
                );
                sqlx::query_as::<_, ResourceMetric>(&query)
                    .bind(website_id)
                    .bind(start)
                    .bind(end)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM resource_metrics \
                     WHERE website_id = $1 ORDER BY checked_at"
                );
                sqlx::query_as::<_, ResourceMetric>(&query)
                    .bind(website_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
