//! Integration tests for Primrose Market.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p primrose-cli -- migrate all
//! cargo run -p primrose-cli -- seed products
//!
//! # Start both servers
//! cargo run -p primrose-storefront &
//! cargo run -p primrose-admin &
//!
//! # Run integration tests
//! cargo test -p primrose-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_checkout` - Cart and checkout flow over HTTP
//! - `admin_panel` - Admin authentication gating
//!
//! Tests are `#[ignore]`d by default since they need running servers.

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin panel (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A client with a cookie store, so the cart cookie and session survive
/// across requests, and without redirect following, so gating redirects can
/// be asserted directly.
///
/// # Panics
///
/// Panics if the client cannot be constructed (never happens with this
/// configuration).
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
