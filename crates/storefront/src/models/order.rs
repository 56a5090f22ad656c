//! Order domain types.
//!
//! An order is a snapshot taken once at place-order time: line items, address,
//! payment method, and the four derived prices are copied out of the cart and
//! never mutated afterward by the storefront.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use primrose_core::{OrderId, OrderTotals, PaymentMethod, ShippingAddress, UserId};

/// A finalized order (domain type).
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Public identifier used in confirmation URLs.
    pub public_id: Uuid,
    /// User who placed the order.
    pub user_id: UserId,
    /// Destination address, as entered at checkout.
    pub shipping_address: ShippingAddress,
    /// Payment method selected at checkout.
    pub payment_method: PaymentMethod,
    /// Prices derived from the line items at placement time.
    pub totals: OrderTotals,
    /// Whether payment has been recorded (set from the admin panel).
    pub is_paid: bool,
    /// When payment was recorded.
    pub paid_at: Option<DateTime<Utc>>,
    /// Whether the order has been delivered (set from the admin panel).
    pub is_delivered: bool,
    /// When delivery was recorded.
    pub delivered_at: Option<DateTime<Utc>>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// One line of a finalized order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Product slug at placement time.
    pub slug: String,
    /// Product name at placement time.
    pub name: String,
    /// Unit price at placement time.
    pub price: f64,
    /// Quantity ordered.
    pub quantity: i32,
    /// Product image at placement time.
    pub image: String,
}
