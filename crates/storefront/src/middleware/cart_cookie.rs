//! Cart cookie persistence.
//!
//! The whole cart lives in one `cart` cookie as URL-encoded JSON. The cookie
//! is a cache of client-held state, not an authority: prices are always
//! recomputed from the line items server-side, and order placement re-checks
//! the checkout preconditions.
//!
//! A cookie that fails to decode is treated as an empty cart rather than an
//! error; the next write replaces it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use primrose_core::Cart;

/// Cart cookie name.
pub const CART_COOKIE_NAME: &str = "cart";

/// Read the cart out of the cookie jar.
///
/// Missing or undecodable cookies yield an empty cart.
#[must_use]
pub fn read_cart(jar: &CookieJar) -> Cart {
    let Some(cookie) = jar.get(CART_COOKIE_NAME) else {
        return Cart::default();
    };

    let decoded = match urlencoding::decode(cookie.value()) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Cart cookie is not valid UTF-8, resetting: {e}");
            return Cart::default();
        }
    };

    match serde_json::from_str(&decoded) {
        Ok(cart) => cart,
        Err(e) => {
            tracing::warn!("Cart cookie failed to parse, resetting: {e}");
            Cart::default()
        }
    }
}

/// Write the cart back into the jar, replacing the previous cookie wholesale.
///
/// On the (practically impossible) serialization failure the jar is returned
/// unchanged so the previous state survives.
#[must_use]
pub fn write_cart(jar: CookieJar, cart: &Cart) -> CookieJar {
    let json = match serde_json::to_string(cart) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize cart cookie: {e}");
            return jar;
        }
    };

    let cookie = Cookie::build((CART_COOKIE_NAME, urlencoding::encode(&json).into_owned()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .build();

    jar.add(cookie)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use primrose_core::{CartAction, CartLineItem};

    fn sample_cart() -> Cart {
        Cart::default().apply(CartAction::AddItem(CartLineItem {
            slug: "wool-scarf".to_owned(),
            name: "Wool Scarf".to_owned(),
            price: 34.5,
            quantity: 2,
            image: "/static/images/wool-scarf.jpg".to_owned(),
            count_in_stock: 8,
        }))
    }

    #[test]
    fn test_cookie_roundtrip() {
        let jar = write_cart(CookieJar::new(), &sample_cart());
        assert_eq!(read_cart(&jar), sample_cart());
    }

    #[test]
    fn test_missing_cookie_is_empty_cart() {
        assert_eq!(read_cart(&CookieJar::new()), Cart::default());
    }

    #[test]
    fn test_garbage_cookie_is_empty_cart() {
        let jar = CookieJar::new().add(Cookie::new(CART_COOKIE_NAME, "%7Bnot-json"));
        assert_eq!(read_cart(&jar), Cart::default());
    }

    #[test]
    fn test_write_replaces_wholesale() {
        let jar = write_cart(CookieJar::new(), &sample_cart());
        let cleared = sample_cart().apply(CartAction::ClearItems);
        let jar = write_cart(jar, &cleared);
        assert_eq!(read_cart(&jar), cleared);
    }
}
