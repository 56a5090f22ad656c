//! Checkout route handlers: shipping → payment → place-order.
//!
//! Each screen is gated on the data of the previous step via
//! [`Cart::redirect_for`]; arriving early just bounces the request backward
//! without touching the cart. All screens require a logged-in user.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use primrose_core::{
    Cart, CartAction, CheckoutStep, FieldError, OrderTotals, PaymentMethod, ShippingAddress,
};

use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAuth, read_cart, write_cart};
use crate::routes::cart::CartItemView;
use crate::services::checkout;
use crate::services::checkout::CheckoutError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Shipping address form data.
#[derive(Debug, Deserialize)]
pub struct ShippingForm {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

impl ShippingForm {
    fn into_address(self) -> ShippingAddress {
        ShippingAddress {
            full_name: self.full_name.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }
}

/// Payment method form data.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub payment_method: Option<String>,
}

// =============================================================================
// View Types
// =============================================================================

/// Per-field error messages for inline display on the shipping form.
#[derive(Default, Clone)]
pub struct ShippingFieldErrors {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl From<Vec<FieldError>> for ShippingFieldErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        let mut view = Self::default();
        for error in errors {
            match error.field {
                "full_name" => view.full_name = Some(error.message),
                "address" => view.address = Some(error.message),
                "city" => view.city = Some(error.message),
                "postal_code" => view.postal_code = Some(error.message),
                "country" => view.country = Some(error.message),
                "phone" => view.phone = Some(error.message),
                other => tracing::warn!("Unmapped shipping field error: {other}"),
            }
        }
        view
    }
}

/// One selectable payment method.
#[derive(Clone)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub selected: bool,
}

// =============================================================================
// Templates
// =============================================================================

/// Shipping address page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/shipping.html")]
pub struct ShippingTemplate {
    pub active_step: u8,
    pub values: ShippingAddress,
    pub errors: ShippingFieldErrors,
}

/// Payment method page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/payment.html")]
pub struct PaymentTemplate {
    pub active_step: u8,
    pub options: Vec<PaymentOptionView>,
    pub error: Option<String>,
}

/// Order review page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/place_order.html")]
pub struct PlaceOrderTemplate {
    pub active_step: u8,
    pub items: Vec<CartItemView>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub totals: OrderTotals,
}

// =============================================================================
// Helpers
// =============================================================================

/// Bounce back to an earlier step when this one's precondition is missing.
fn gate(cart: &Cart, step: CheckoutStep) -> Option<Response> {
    cart.redirect_for(step)
        .map(|back_to| Redirect::to(back_to.path()).into_response())
}

fn payment_options(cart: &Cart) -> Vec<PaymentOptionView> {
    PaymentMethod::ALL
        .iter()
        .map(|method| PaymentOptionView {
            value: method.as_str(),
            selected: cart.payment_method == Some(*method),
        })
        .collect()
}

// =============================================================================
// Shipping
// =============================================================================

/// Display the shipping address form, prefilled from the cart.
#[instrument(skip(jar))]
pub async fn shipping_page(RequireAuth(_user): RequireAuth, jar: CookieJar) -> impl IntoResponse {
    let cart = read_cart(&jar);

    ShippingTemplate {
        active_step: CheckoutStep::Shipping.position(),
        values: cart.shipping_address.unwrap_or_default(),
        errors: ShippingFieldErrors::default(),
    }
}

/// Handle shipping form submission.
///
/// Field failures re-render the form with inline messages; a valid address is
/// saved to the cart and the flow advances to payment.
#[instrument(skip(jar, form))]
pub async fn submit_shipping(
    RequireAuth(_user): RequireAuth,
    jar: CookieJar,
    Form(form): Form<ShippingForm>,
) -> Response {
    let address = form.into_address();

    if let Err(errors) = address.validate() {
        return ShippingTemplate {
            active_step: CheckoutStep::Shipping.position(),
            values: address,
            errors: errors.into(),
        }
        .into_response();
    }

    let cart = read_cart(&jar).apply(CartAction::SaveShippingAddress(address));
    let jar = write_cart(jar, &cart);

    (jar, Redirect::to(CheckoutStep::Payment.path())).into_response()
}

// =============================================================================
// Payment
// =============================================================================

/// Display the payment method selection.
///
/// Without a shipping address on file this redirects back to shipping.
#[instrument(skip(jar))]
pub async fn payment_page(RequireAuth(_user): RequireAuth, jar: CookieJar) -> Response {
    let cart = read_cart(&jar);

    if let Some(redirect) = gate(&cart, CheckoutStep::Payment) {
        return redirect;
    }

    PaymentTemplate {
        active_step: CheckoutStep::Payment.position(),
        options: payment_options(&cart),
        error: None,
    }
    .into_response()
}

/// Handle payment method submission.
#[instrument(skip(jar, form))]
pub async fn submit_payment(
    RequireAuth(_user): RequireAuth,
    jar: CookieJar,
    Form(form): Form<PaymentForm>,
) -> Response {
    let cart = read_cart(&jar);

    if let Some(redirect) = gate(&cart, CheckoutStep::Payment) {
        return redirect;
    }

    let Some(method) = form
        .payment_method
        .as_deref()
        .and_then(|value| value.parse::<PaymentMethod>().ok())
    else {
        return PaymentTemplate {
            active_step: CheckoutStep::Payment.position(),
            options: payment_options(&cart),
            error: Some("Payment Method not selected".to_owned()),
        }
        .into_response();
    };

    let cart = cart.apply(CartAction::SavePaymentMethod(method));
    let jar = write_cart(jar, &cart);

    (jar, Redirect::to(CheckoutStep::PlaceOrder.path())).into_response()
}

// =============================================================================
// Place Order
// =============================================================================

/// Display the order review.
///
/// Without a payment method on file this redirects back to payment. Totals
/// are derived fresh from the line items here, exactly as they will be at
/// placement.
#[instrument(skip(jar))]
pub async fn place_order_page(RequireAuth(_user): RequireAuth, jar: CookieJar) -> Response {
    let cart = read_cart(&jar);

    if let Some(redirect) = gate(&cart, CheckoutStep::PlaceOrder) {
        return redirect;
    }

    let shipping_address = cart.shipping_address.clone().unwrap_or_default();
    let payment_method = cart
        .payment_method
        .map(|method| method.as_str().to_owned())
        .unwrap_or_default();

    PlaceOrderTemplate {
        active_step: CheckoutStep::PlaceOrder.position(),
        items: cart.items.iter().map(CartItemView::from).collect(),
        shipping_address,
        payment_method,
        totals: OrderTotals::for_items(&cart.items),
    }
    .into_response()
}

/// Confirm the order.
///
/// Creates the order snapshot, clears the cart's line items (checkout
/// selections survive for the next order), and lands on the confirmation
/// page for the new order.
#[instrument(skip(state, jar))]
pub async fn place_order(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response> {
    let cart = read_cart(&jar);

    if let Some(redirect) = gate(&cart, CheckoutStep::PlaceOrder) {
        return Ok(redirect);
    }

    let order = match checkout::place_order(state.pool(), user.id, &cart).await {
        Ok(order) => order,
        Err(CheckoutError::EmptyCart) => {
            return Ok(Redirect::to("/cart").into_response());
        }
        Err(other) => return Err(other.into()),
    };

    let cart = cart.apply(CartAction::ClearItems);
    let jar = write_cart(jar, &cart);

    let confirmation = format!("/orders/{}", order.public_id);
    Ok((jar, Redirect::to(&confirmation)).into_response())
}
