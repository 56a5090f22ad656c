//! Integration tests for the storefront cart and checkout flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p primrose-storefront)
//! - The sample catalog seeded (primrose-cli seed products)
//!
//! Run with: cargo test -p primrose-integration-tests -- --ignored

use reqwest::StatusCode;
use uuid::Uuid;

use primrose_integration_tests::{client, storefront_base_url};

/// Register a throwaway user and leave the client logged in.
async fn register_test_user(client: &reqwest::Client) -> String {
    let base_url = storefront_base_url();
    let email = format!("test-{}@example.com", Uuid::new_v4());

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .form(&[
            ("name", "Test Shopper"),
            ("email", &email),
            ("password", "hunter2!"),
            ("password_confirm", "hunter2!"),
        ])
        .send()
        .await
        .expect("Failed to register test user");

    // Successful registration logs in and redirects home
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    email
}

fn location(resp: &reqwest::Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_health() {
    let client = client();
    let resp = client
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_add_to_cart_sets_cookie() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[("slug", "wool-scarf")])
        .send()
        .await
        .expect("Failed to add to cart");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");

    // The cart page now lists the item
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to load cart");
    let body = resp.text().await.expect("Failed to read cart page");
    assert!(body.contains("Wool Scarf"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_oversized_quantity_update_is_rejected() {
    let client = client();
    let base_url = storefront_base_url();

    client
        .post(format!("{base_url}/cart/add"))
        .form(&[("slug", "wool-scarf")])
        .send()
        .await
        .expect("Failed to add to cart");

    // Far more than any seeded stock count
    let resp = client
        .post(format!("{base_url}/cart/update"))
        .form(&[("slug", "wool-scarf"), ("quantity", "9999")])
        .send()
        .await
        .expect("Failed to post update");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart?error=out_of_stock");

    // Cart is unchanged: still quantity 1
    let body = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to load cart")
        .text()
        .await
        .expect("Failed to read cart page");
    assert!(body.contains("Subtotal (1 items)"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_payment_screen_redirects_without_shipping_address() {
    let client = client();
    let base_url = storefront_base_url();

    register_test_user(&client).await;

    client
        .post(format!("{base_url}/cart/add"))
        .form(&[("slug", "wool-scarf")])
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .get(format!("{base_url}/checkout/payment"))
        .send()
        .await
        .expect("Failed to load payment screen");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/checkout/shipping");

    // Gating did not alter the cart
    let body = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to load cart")
        .text()
        .await
        .expect("Failed to read cart page");
    assert!(body.contains("Wool Scarf"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_full_checkout_flow() {
    let client = client();
    let base_url = storefront_base_url();

    register_test_user(&client).await;

    client
        .post(format!("{base_url}/cart/add"))
        .form(&[("slug", "wool-scarf")])
        .send()
        .await
        .expect("Failed to add to cart");

    // Shipping
    let resp = client
        .post(format!("{base_url}/checkout/shipping"))
        .form(&[
            ("full_name", "Test Shopper"),
            ("address", "12 Main St"),
            ("city", "Springfield"),
            ("postal_code", "12345-678"),
            ("country", "USA"),
            ("phone", "5551234567"),
        ])
        .send()
        .await
        .expect("Failed to submit shipping");
    assert_eq!(location(&resp), "/checkout/payment");

    // Payment
    let resp = client
        .post(format!("{base_url}/checkout/payment"))
        .form(&[("payment_method", "CashOnDelivery")])
        .send()
        .await
        .expect("Failed to submit payment");
    assert_eq!(location(&resp), "/checkout/place-order");

    // Place order
    let resp = client
        .post(format!("{base_url}/checkout/place-order"))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let confirmation = location(&resp).to_owned();
    assert!(confirmation.starts_with("/orders/"));

    // Confirmation page renders the order
    let body = client
        .get(format!("{base_url}{confirmation}"))
        .send()
        .await
        .expect("Failed to load confirmation")
        .text()
        .await
        .expect("Failed to read confirmation page");
    assert!(body.contains("Wool Scarf"));
    assert!(body.contains("CashOnDelivery"));

    // Cart items were cleared by placement
    let body = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to load cart")
        .text()
        .await
        .expect("Failed to read cart page");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_invalid_shipping_form_shows_field_errors() {
    let client = client();
    let base_url = storefront_base_url();

    register_test_user(&client).await;

    let resp = client
        .post(format!("{base_url}/checkout/shipping"))
        .form(&[
            ("full_name", "T"),
            ("address", ""),
            ("city", ""),
            ("postal_code", "12"),
            ("country", ""),
            ("phone", "123"),
        ])
        .send()
        .await
        .expect("Failed to submit shipping");

    // Re-rendered inline rather than redirected
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read shipping page");
    assert!(body.contains("Full name is required"));
    assert!(body.contains("00000-000"));
    assert!(body.contains("10 digits"));
}
