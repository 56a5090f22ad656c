//! Customer repository: read-only view of storefront users for the admin
//! panel, plus the login audit trail.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepositoryError;

/// One row of the customer list.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerSummary {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub orders_count: i64,
    pub created_at: DateTime<Utc>,
}

/// One entry of the login audit trail.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LoginLogEntry {
    pub email: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// Repository for customer reads.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all storefront users with their order counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<CustomerSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerSummary>(
            r#"
            SELECT u.id, u.email, u.name, COUNT(o.id) AS orders_count, u.created_at
            FROM storefront."user" u
            LEFT JOIN storefront."order" o ON o.user_id = u.id
            GROUP BY u.id
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// The most recent login attempts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_logins(&self, limit: i64) -> Result<Vec<LoginLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, LoginLogEntry>(
            r#"
            SELECT email, success, timestamp
            FROM storefront.login_log
            ORDER BY timestamp DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
