//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Dashboard (counts, revenue, recent orders)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//!
//! # Products (writes require Admin role)
//! GET  /products               - Product list
//! GET  /products/new           - New product form
//! POST /products               - Create product
//! GET  /products/:id/edit      - Edit product form
//! POST /products/:id           - Update product
//! POST /products/:id/delete    - Delete product
//!
//! # Orders (writes require Admin role)
//! GET  /orders                 - Order list
//! GET  /orders/:id             - Order detail
//! POST /orders/:id/pay         - Record payment
//! POST /orders/:id/deliver     - Record delivery
//!
//! # Customers
//! GET  /customers              - Storefront users and login activity
//!
//! # Admin users (super admin only)
//! GET  /admins                 - Admin user list
//! ```

pub mod admins;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Reject roles without write access to store data.
pub(crate) fn require_write(admin: &CurrentAdmin) -> Result<(), AppError> {
    if admin.role.can_write() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "viewers have read-only access".to_owned(),
        ))
    }
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/products", get(products::index).post(products::create))
        .route("/products/new", get(products::new_form))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/edit", get(products::edit_form))
        .route("/products/{id}/delete", post(products::delete))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/pay", post(orders::mark_paid))
        .route("/orders/{id}/deliver", post(orders::mark_delivered))
        .route("/customers", get(customers::index))
        .route("/admins", get(admins::index))
}
