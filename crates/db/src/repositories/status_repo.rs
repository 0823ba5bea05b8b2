//! Repository for the `status_checks` table.

use sitewatch_core::daterange::DateRangeFilter;
use sitewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::{CreateStatusCheck, StatusCheck};

/// Column list for `status_checks` queries.
const COLUMNS: &str = "\
    id, website_id, status_code, response_time, page_load, page_size, \
    is_up, checked_at, created_at";

/// Provides query operations for status check history.
pub struct StatusRepo;

impl StatusRepo {
    /// Insert a new status check row.
    pub async fn insert(pool: &PgPool, dto: &CreateStatusCheck) -> Result<StatusCheck, sqlx::Error> {
        let query = format!(
            "INSERT INTO status_checks \
                (website_id, status_code, response_time, page_load, page_size, is_up, checked_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusCheck>(&query)
            .bind(dto.website_id)
            .bind(dto.status_code)
            .bind(dto.response_time)
            .bind(dto.page_load)
            .bind(dto.page_size)
            .bind(dto.is_up)
            .bind(dto.checked_at)
            .fetch_one(pool)
            .await
    }

    /// List status history for a website within the date-range filter,
    /// oldest first.
    pub async fn list_for_website(
        pool: &PgPool,
        website_id: DbId,
        filter: DateRangeFilter,
    ) -> Result<Vec<StatusCheck>, sqlx::Error> {
        match filter.bounds(chrono::Utc::now()) {
            Some((start, end)) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM status_checks \
                     WHERE website_id = $1 AND checked_at BETWEEN $2 AND $3 \
                     ORDER BY checked_at"
                );
                sqlx::query_as::<_, StatusCheck>(&query)
                    .bind(website_id)
                    .bind(start)
                    .bind(end)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM status_checks \
                     WHERE website_id = $1 ORDER BY checked_at"
                );
                sqlx::query_as::<_, StatusCheck>(&query)
                    .bind(website_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
