//! Order repository for the admin panel.
//!
//! Reads every order in the store and flips the paid/delivered flags. Those
//! two flags are the only mutation the system ever applies to an order after
//! placement.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use primrose_core::OrderId;

use super::RepositoryError;

/// One row of the admin order list.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: i32,
    pub public_id: Uuid,
    pub user_email: String,
    pub total_price: f64,
    pub is_paid: bool,
    pub is_delivered: bool,
    pub created_at: DateTime<Utc>,
}

/// Full order detail for the admin order page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderDetail {
    pub id: i32,
    pub public_id: Uuid,
    pub user_email: String,
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub payment_method: String,
    pub items_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One line of an order, as shown on the admin order page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderLine {
    pub slug: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// Store-wide counters for the dashboard.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct DashboardStats {
    pub orders_count: i64,
    pub users_count: i64,
    pub products_count: i64,
    pub revenue: f64,
}

const SUMMARY_QUERY: &str = r#"
    SELECT o.id, o.public_id, u.email AS user_email, o.total_price,
           o.is_paid, o.is_delivered, o.created_at
    FROM storefront."order" o
    JOIN storefront."user" u ON u.id = o.user_id
    ORDER BY o.created_at DESC
"#;

/// Repository for admin order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderSummary>(SUMMARY_QUERY)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// The most recent orders, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderSummary>(&format!("{SUMMARY_QUERY} LIMIT $1"))
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Get full detail and line items for one order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: OrderId,
    ) -> Result<Option<(OrderDetail, Vec<OrderLine>)>, RepositoryError> {
        let detail = sqlx::query_as::<_, OrderDetail>(
            r#"
            SELECT o.id, o.public_id, u.email AS user_email,
                   o.full_name, o.address, o.city, o.postal_code, o.country, o.phone,
                   o.payment_method, o.items_price, o.shipping_price, o.tax_price,
                   o.total_price, o.is_paid, o.paid_at, o.is_delivered, o.delivered_at,
                   o.created_at
            FROM storefront."order" o
            JOIN storefront."user" u ON u.id = o.user_id
            WHERE o.id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(detail) = detail else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT slug, name, price, quantity
            FROM storefront.order_item
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(detail.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some((detail, lines)))
    }

    /// Record payment for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn mark_paid(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE storefront."order"
            SET is_paid = TRUE, paid_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Record delivery for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn mark_delivered(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE storefront."order"
            SET is_delivered = TRUE, delivered_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Store-wide counters for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM storefront."order") AS orders_count,
                (SELECT COUNT(*) FROM storefront."user") AS users_count,
                (SELECT COUNT(*) FROM storefront.product) AS products_count,
                (SELECT COALESCE(SUM(total_price), 0) FROM storefront."order") AS revenue
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(stats)
    }
}
