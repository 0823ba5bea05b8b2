//! Repository for the `users` table.

use sitewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, client_id, email, password_hash, role, timezone, \
    notification_email, is_active, created_at";

/// Provides query operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Create a new user (password must already be hashed).
    pub async fn create(pool: &PgPool, dto: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (client_id, email, password_hash, role, timezone, notification_email) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(dto.client_id)
            .bind(&dto.email)
            .bind(&dto.password_hash)
            .bind(&dto.role)
            .bind(&dto.timezone)
            .bind(&dto.notification_email)
            .fetch_one(pool)
            .await
    }

    /// Get a single user by ID.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active user by login email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1 AND is_active");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
