//! Order placement service.
//!
//! Turns the current cart into a persisted order snapshot. Totals are
//! recomputed here from the line items; the cookie's copy of the cart is
//! never trusted for pricing.

use sqlx::PgPool;
use thiserror::Error;

use primrose_core::{Cart, OrderTotals};
use primrose_core::UserId;

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::models::order::Order;

/// Errors from order placement.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The shipping step has not been completed.
    #[error("no shipping address on file")]
    MissingShippingAddress,

    /// The payment step has not been completed.
    #[error("no payment method selected")]
    MissingPaymentMethod,

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create the order snapshot for a completed checkout.
///
/// Verifies the checkout preconditions one final time (the screens gate on
/// them too, but the cookie is client-held), derives the four prices from the
/// line items, and persists everything in one transaction.
///
/// # Errors
///
/// Returns a `CheckoutError` when a precondition is missing or the database
/// write fails. The cart is left untouched in every error case.
pub async fn place_order(
    pool: &PgPool,
    user_id: UserId,
    cart: &Cart,
) -> Result<Order, CheckoutError> {
    if cart.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let shipping_address = cart
        .shipping_address
        .as_ref()
        .ok_or(CheckoutError::MissingShippingAddress)?;
    let payment_method = cart
        .payment_method
        .ok_or(CheckoutError::MissingPaymentMethod)?;

    let totals = OrderTotals::for_items(&cart.items);

    let order = OrderRepository::new(pool)
        .create(user_id, shipping_address, payment_method, &totals, &cart.items)
        .await?;

    tracing::info!(
        order_id = %order.id,
        public_id = %order.public_id,
        total = order.totals.total_price,
        "Order placed"
    );

    Ok(order)
}
