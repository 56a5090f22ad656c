//! Order repository for database operations.
//!
//! Orders are written exactly once, at place-order time; the storefront never
//! updates them afterward. Payment/delivery flags are flipped from the admin
//! panel.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use primrose_core::{
    CartLineItem, OrderId, OrderTotals, PaymentMethod, ShippingAddress, UserId,
};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    public_id: Uuid,
    user_id: i32,
    full_name: String,
    address: String,
    city: String,
    postal_code: String,
    country: String,
    phone: String,
    payment_method: String,
    items_price: f64,
    shipping_price: f64,
    tax_price: f64,
    total_price: f64,
    is_paid: bool,
    paid_at: Option<DateTime<Utc>>,
    is_delivered: bool,
    delivered_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let payment_method: PaymentMethod = self.payment_method.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment method in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            public_id: self.public_id,
            user_id: UserId::new(self.user_id),
            shipping_address: ShippingAddress {
                full_name: self.full_name,
                address: self.address,
                city: self.city,
                postal_code: self.postal_code,
                country: self.country,
                phone: self.phone,
            },
            payment_method,
            totals: OrderTotals {
                items_price: self.items_price,
                shipping_price: self.shipping_price,
                tax_price: self.tax_price,
                total_price: self.total_price,
            },
            is_paid: self.is_paid,
            paid_at: self.paid_at,
            is_delivered: self.is_delivered,
            delivered_at: self.delivered_at,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    slug: String,
    name: String,
    price: f64,
    quantity: i32,
    image: String,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            slug: row.slug,
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            image: row.image,
        }
    }
}

const ORDER_COLUMNS: &str =
    "id, public_id, user_id, full_name, address, city, postal_code, country, phone, \
     payment_method, items_price, shipping_price, tax_price, total_price, \
     is_paid, paid_at, is_delivered, delivered_at, created_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a finalized order snapshot with its line items.
    ///
    /// The order and all items are written in one transaction; the returned
    /// order carries the generated public ID used for the confirmation URL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(
        &self,
        user_id: UserId,
        shipping_address: &ShippingAddress,
        payment_method: PaymentMethod,
        totals: &OrderTotals,
        items: &[CartLineItem],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO storefront."order"
                (public_id, user_id, full_name, address, city, postal_code, country, phone,
                 payment_method, items_price, shipping_price, tax_price, total_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id.as_i32())
        .bind(&shipping_address.full_name)
        .bind(&shipping_address.address)
        .bind(&shipping_address.city)
        .bind(&shipping_address.postal_code)
        .bind(&shipping_address.country)
        .bind(&shipping_address.phone)
        .bind(payment_method.as_str())
        .bind(totals.items_price)
        .bind(totals.shipping_price)
        .bind(totals.tax_price)
        .bind(totals.total_price)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO storefront.order_item (order_id, slug, name, price, quantity, image)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(row.id)
            .bind(&item.slug)
            .bind(&item.name)
            .bind(item.price)
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .bind(&item.image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        row.into_order()
    }

    /// Get an order and its items by the public confirmation ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_public_id(
        &self,
        public_id: Uuid,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM storefront."order" WHERE public_id = $1"#
        ))
        .bind(public_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT slug, name, price, quantity, image
            FROM storefront.order_item
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        let order = row.into_order()?;
        Ok(Some((order, items.into_iter().map(OrderItem::from).collect())))
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM storefront."order"
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }
}
