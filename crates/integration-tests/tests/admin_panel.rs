//! Integration tests for admin panel authentication gating.
//!
//! These tests require a running admin server (cargo run -p primrose-admin)
//! with migrations applied.
//!
//! Run with: cargo test -p primrose-integration-tests -- --ignored

use reqwest::StatusCode;

use primrose_integration_tests::{admin_base_url, client};

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_health() {
    let client = client();
    let resp = client
        .get(format!("{}/health", admin_base_url()))
        .send()
        .await
        .expect("Failed to reach admin panel");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_dashboard_requires_login() {
    let client = client();
    let resp = client
        .get(admin_base_url())
        .send()
        .await
        .expect("Failed to reach admin panel");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_login_rejects_unknown_admin() {
    let client = client();
    let resp = client
        .post(format!("{}/auth/login", admin_base_url()))
        .form(&[("email", "nobody@example.com"), ("password", "wrong-password")])
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/auth/login?error=credentials");
}
