//! Repository for the `clients` table.

use sitewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient};

/// Column list for `clients` queries.
const COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for clients (organizations).
pub struct ClientRepo;

impl ClientRepo {
    /// Create a new client.
    pub async fn create(pool: &PgPool, dto: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!("INSERT INTO clients (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Client>(&query)
            .bind(&dto.name)
            .fetch_one(pool)
            .await
    }

    /// Get a single client by ID.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the alert notification recipient list for a client.
    ///
    /// Returns the non-null `notification_email` of every active member,
    /// paired with that member's preferred timezone (if set).
    pub async fn notification_recipients(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<(String, Option<String>)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT notification_email, timezone FROM users \
             WHERE client_id = $1 AND is_active AND notification_email IS NOT NULL \
             ORDER BY notification_email",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }
}
