//! Product domain types.

use chrono::{DateTime, Utc};

use primrose_core::ProductId;

/// A catalog product (domain type).
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// URL-safe identifier, unique across the catalog.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Category label (e.g., "Shirts").
    pub category: String,
    /// Brand label.
    pub brand: String,
    /// Image path under `/static`.
    pub image: String,
    /// Unit price in dollars, 2-decimal precision.
    pub price: f64,
    /// Units currently on hand.
    pub count_in_stock: i32,
    /// Long-form description.
    pub description: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Stock on hand clamped to a displayable unsigned count.
    #[must_use]
    pub fn stock(&self) -> u32 {
        u32::try_from(self.count_in_stock).unwrap_or(0)
    }

    /// Whether at least one unit can be sold.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.count_in_stock > 0
    }
}
