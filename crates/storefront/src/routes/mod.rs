//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page (product grid)
//! GET  /health                   - Health check
//!
//! # Products
//! GET  /products/:slug           - Product detail
//! GET  /api/products/:slug       - Stock check (JSON)
//!
//! # Cart
//! GET  /cart                     - Cart page
//! POST /cart/add                 - Add item (or bump quantity)
//! POST /cart/update              - Update quantity (stock-checked)
//! POST /cart/remove              - Remove item
//!
//! # Checkout (requires auth, step-gated)
//! GET  /checkout/shipping        - Shipping address form
//! POST /checkout/shipping        - Save address, advance to payment
//! GET  /checkout/payment         - Payment method selection
//! POST /checkout/payment         - Save method, advance to place-order
//! GET  /checkout/place-order     - Order review
//! POST /checkout/place-order     - Create the order, clear cart items
//!
//! # Orders (requires auth)
//! GET  /orders/:public_id        - Order confirmation
//!
//! # Auth
//! GET  /auth/login               - Login page
//! POST /auth/login               - Login action
//! GET  /auth/register            - Register page
//! POST /auth/register            - Register action
//! POST /auth/logout              - Logout action (also resets the cart)
//!
//! # Account (requires auth)
//! GET  /account                  - Account overview with order history
//! ```

pub mod account;
pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shipping",
            get(checkout::shipping_page).post(checkout::submit_shipping),
        )
        .route(
            "/payment",
            get(checkout::payment_page).post(checkout::submit_payment),
        )
        .route(
            "/place-order",
            get(checkout::place_order_page).post(checkout::place_order),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .route("/products/{slug}", get(products::show))
        .route("/api/products/{slug}", get(api::product_stock))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout routes
        .nest("/checkout", checkout_routes())
        // Order confirmation
        .route("/orders/{public_id}", get(orders::show))
        // Account routes
        .route("/account", get(account::index))
        // Auth routes
        .nest("/auth", auth_routes())
}
