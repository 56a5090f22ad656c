//! Cart state and checkout progression.
//!
//! The cart is confined to one browser session: it lives in a cookie as JSON
//! and is replaced wholesale on every mutation. Mutations are expressed as
//! [`CartAction`]s applied through the pure [`Cart::apply`] transition, so the
//! storefront handlers never edit cart state in place.
//!
//! Checkout advances shipping → payment → place-order. Each step is gated on
//! the data of the previous one; [`Cart::redirect_for`] answers where a
//! request for a step must be redirected when its precondition is missing.

use serde::{Deserialize, Serialize};

use crate::types::PaymentMethod;

/// One product line in the cart.
///
/// `price` and `count_in_stock` are copied from the product at the time the
/// item is added; stock is re-checked against the database on every quantity
/// update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product identifier used in URLs and for line matching.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Unit price in dollars, 2-decimal precision.
    pub price: f64,
    /// Requested quantity, always at least 1.
    pub quantity: u32,
    /// Product image path.
    pub image: String,
    /// Stock on hand when the item was last added or updated.
    pub count_in_stock: u32,
}

impl CartLineItem {
    /// Line subtotal (quantity × unit price), unrounded.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// A validation failure on a single shipping form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name the error belongs to.
    pub field: &'static str,
    /// Human-readable message shown inline next to the field.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Destination address collected on the shipping screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    #[serde(rename = "zip")]
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Validate all fields, collecting one error per offending field.
    ///
    /// # Errors
    ///
    /// Returns every field failure at once so the form can render them inline.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().len() < 3 {
            errors.push(FieldError::new(
                "full_name",
                "Full name is required (min 3 characters)",
            ));
        }
        if self.address.trim().len() < 3 {
            errors.push(FieldError::new(
                "address",
                "Address is required (min 3 characters)",
            ));
        }
        if self.city.trim().is_empty() {
            errors.push(FieldError::new("city", "City is required"));
        }
        if !is_valid_postal_code(&self.postal_code) {
            errors.push(FieldError::new(
                "postal_code",
                "ZIP is required and must be in format 00000 or 00000-000",
            ));
        }
        if self.country.trim().is_empty() {
            errors.push(FieldError::new("country", "Country is required"));
        }
        if !is_valid_phone(&self.phone) {
            errors.push(FieldError::new(
                "phone",
                "Valid phone number is required (10 digits)",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Postal codes are five digits, optionally followed by a dash and three more.
#[must_use]
pub fn is_valid_postal_code(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        9 => {
            bytes.iter().take(5).all(u8::is_ascii_digit)
                && bytes.get(5) == Some(&b'-')
                && bytes.iter().skip(6).all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Phone numbers are exactly ten digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

/// The cart: line items plus in-progress checkout selections.
///
/// Derived totals are never stored here; they are recomputed from the line
/// items wherever they are needed. The cookie copy of this struct is a cache,
/// not the authority on pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Cart {
    #[serde(rename = "cartItems")]
    pub items: Vec<CartLineItem>,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: Option<PaymentMethod>,
}

/// A single cart mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Insert a line item, replacing any existing line with the same slug.
    AddItem(CartLineItem),
    /// Remove the line with this slug, if present.
    RemoveItem { slug: String },
    /// Drop all line items but keep address and payment selections.
    ClearItems,
    /// Forget everything, including checkout selections.
    Reset,
    /// Record the shipping address.
    SaveShippingAddress(ShippingAddress),
    /// Record the payment method selection.
    SavePaymentMethod(PaymentMethod),
}

/// How far through checkout the cart data has progressed.
///
/// `Placed` is reached when the order snapshot is created; the cart itself
/// never carries that stage since its items are cleared at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    NoShipping,
    HasShipping,
    HasPayment,
    Placed,
}

/// A checkout screen, gated on the data of the preceding one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    PlaceOrder,
}

impl CheckoutStep {
    /// URL path of the screen.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Shipping => "/checkout/shipping",
            Self::Payment => "/checkout/payment",
            Self::PlaceOrder => "/checkout/place-order",
        }
    }

    /// 1-based position in the checkout wizard, for progress display.
    #[must_use]
    pub const fn position(&self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::PlaceOrder => 3,
        }
    }
}

impl Cart {
    /// Apply one action, producing the next cart state.
    ///
    /// The previous state is consumed; callers persist the returned value
    /// wholesale (copy-on-write, no in-place edits).
    #[must_use]
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::AddItem(item) => {
                if let Some(existing) = self.items.iter_mut().find(|i| i.slug == item.slug) {
                    *existing = item;
                } else {
                    self.items.push(item);
                }
                self
            }
            CartAction::RemoveItem { slug } => {
                self.items.retain(|i| i.slug != slug);
                self
            }
            CartAction::ClearItems => {
                self.items.clear();
                self
            }
            CartAction::Reset => Self::default(),
            CartAction::SaveShippingAddress(address) => {
                self.shipping_address = Some(address);
                self
            }
            CartAction::SavePaymentMethod(method) => {
                self.payment_method = Some(method);
                self
            }
        }
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Current checkout stage implied by the recorded data.
    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        match (&self.shipping_address, &self.payment_method) {
            (None, _) => CheckoutStage::NoShipping,
            (Some(_), None) => CheckoutStage::HasShipping,
            (Some(_), Some(_)) => CheckoutStage::HasPayment,
        }
    }

    /// Where a request for `step` must be redirected, if its precondition is
    /// not met. `None` means the step may render.
    ///
    /// Gating never changes cart state; entering the payment screen without a
    /// shipping address just bounces back to shipping.
    #[must_use]
    pub const fn redirect_for(&self, step: CheckoutStep) -> Option<CheckoutStep> {
        match step {
            CheckoutStep::Shipping => None,
            CheckoutStep::Payment => {
                if self.shipping_address.is_none() {
                    Some(CheckoutStep::Shipping)
                } else {
                    None
                }
            }
            CheckoutStep::PlaceOrder => {
                if self.payment_method.is_none() {
                    Some(CheckoutStep::Payment)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(slug: &str, quantity: u32) -> CartLineItem {
        CartLineItem {
            slug: slug.to_owned(),
            name: slug.to_owned(),
            price: 25.0,
            quantity,
            image: format!("/images/{slug}.jpg"),
            count_in_stock: 10,
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Jane Doe".to_owned(),
            address: "12 Main St".to_owned(),
            city: "Springfield".to_owned(),
            postal_code: "12345-678".to_owned(),
            country: "USA".to_owned(),
            phone: "5551234567".to_owned(),
        }
    }

    #[test]
    fn test_add_item_appends_then_replaces() {
        let cart = Cart::default().apply(CartAction::AddItem(item("mug", 1)));
        assert_eq!(cart.items.len(), 1);

        // Adding the same slug replaces the line, including its quantity
        let cart = cart.apply(CartAction::AddItem(item("mug", 3)));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);

        let cart = cart.apply(CartAction::AddItem(item("teapot", 1)));
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_remove_item() {
        let cart = Cart::default()
            .apply(CartAction::AddItem(item("mug", 2)))
            .apply(CartAction::AddItem(item("teapot", 1)))
            .apply(CartAction::RemoveItem {
                slug: "mug".to_owned(),
            });
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].slug, "teapot");
    }

    #[test]
    fn test_clear_items_keeps_checkout_selections() {
        let cart = Cart::default()
            .apply(CartAction::AddItem(item("mug", 2)))
            .apply(CartAction::SaveShippingAddress(address()))
            .apply(CartAction::SavePaymentMethod(PaymentMethod::Stripe))
            .apply(CartAction::ClearItems);
        assert!(cart.items.is_empty());
        assert!(cart.shipping_address.is_some());
        assert_eq!(cart.payment_method, Some(PaymentMethod::Stripe));
    }

    #[test]
    fn test_reset_clears_everything() {
        let cart = Cart::default()
            .apply(CartAction::AddItem(item("mug", 2)))
            .apply(CartAction::SaveShippingAddress(address()))
            .apply(CartAction::Reset);
        assert_eq!(cart, Cart::default());
    }

    #[test]
    fn test_stage_progression() {
        let cart = Cart::default().apply(CartAction::AddItem(item("mug", 1)));
        assert_eq!(cart.stage(), CheckoutStage::NoShipping);

        let cart = cart.apply(CartAction::SaveShippingAddress(address()));
        assert_eq!(cart.stage(), CheckoutStage::HasShipping);

        let cart = cart.apply(CartAction::SavePaymentMethod(PaymentMethod::PayPal));
        assert_eq!(cart.stage(), CheckoutStage::HasPayment);
    }

    #[test]
    fn test_payment_screen_requires_shipping_address() {
        let cart = Cart::default().apply(CartAction::AddItem(item("mug", 1)));
        assert_eq!(
            cart.redirect_for(CheckoutStep::Payment),
            Some(CheckoutStep::Shipping)
        );

        // Gating is read-only: the cart is unchanged by the check
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.stage(), CheckoutStage::NoShipping);
    }

    #[test]
    fn test_place_order_screen_requires_payment_method() {
        let cart = Cart::default()
            .apply(CartAction::AddItem(item("mug", 1)))
            .apply(CartAction::SaveShippingAddress(address()));
        assert_eq!(
            cart.redirect_for(CheckoutStep::PlaceOrder),
            Some(CheckoutStep::Payment)
        );

        let cart = cart.apply(CartAction::SavePaymentMethod(PaymentMethod::CashOnDelivery));
        assert_eq!(cart.redirect_for(CheckoutStep::PlaceOrder), None);
    }

    #[test]
    fn test_shipping_screen_always_renders() {
        assert_eq!(Cart::default().redirect_for(CheckoutStep::Shipping), None);
    }

    #[test]
    fn test_address_validation_collects_field_errors() {
        let bad = ShippingAddress {
            full_name: "Jo".to_owned(),
            address: String::new(),
            city: String::new(),
            postal_code: "1234".to_owned(),
            country: String::new(),
            phone: "555".to_owned(),
        };
        let errors = bad.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "full_name",
                "address",
                "city",
                "postal_code",
                "country",
                "phone"
            ]
        );

        assert!(address().validate().is_ok());
    }

    #[test]
    fn test_postal_code_patterns() {
        assert!(is_valid_postal_code("12345"));
        assert!(is_valid_postal_code("12345-678"));
        assert!(!is_valid_postal_code("1234"));
        assert!(!is_valid_postal_code("12345-67"));
        assert!(!is_valid_postal_code("12345678"));
        assert!(!is_valid_postal_code("abcde"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("555123456"));
        assert!(!is_valid_phone("555-123-4567"));
    }

    #[test]
    fn test_cookie_json_shape() {
        let cart = Cart::default()
            .apply(CartAction::AddItem(item("mug", 2)))
            .apply(CartAction::SaveShippingAddress(address()));
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains("\"cartItems\""));
        assert!(json.contains("\"countInStock\""));
        assert!(json.contains("\"shippingAddress\""));
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"zip\""));

        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);

        // A bare items-only cookie still parses
        let partial: Cart = serde_json::from_str("{\"cartItems\":[]}").unwrap();
        assert!(partial.shipping_address.is_none());
    }
}
