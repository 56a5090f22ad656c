//! Cart route handlers.
//!
//! Every mutation reads the cart cookie, applies one [`CartAction`], and
//! writes the replacement cart back wholesale. Quantity changes are checked
//! against current stock first; a failed check leaves the cookie untouched
//! and surfaces a notification on the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use primrose_core::{Cart, CartAction, CartLineItem, round2};

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{read_cart, write_cart};
use crate::models::Product;
use crate::state::AppState;

/// One selectable quantity in the cart's quantity dropdown.
#[derive(Clone, Copy)]
pub struct QtyOptionView {
    pub value: u32,
    pub selected: bool,
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub slug: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub line_total: f64,
    pub image: String,
    /// Selectable quantities, bounded by stock on hand.
    pub qty_options: Vec<QtyOptionView>,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            slug: item.slug.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            line_total: round2(item.line_total()),
            image: item.image.clone(),
            qty_options: (1..=item.count_in_stock.max(1))
                .map(|value| QtyOptionView {
                    value,
                    selected: value == item.quantity,
                })
                .collect(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: f64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal: round2(cart.items.iter().map(CartLineItem::line_total).sum()),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub slug: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub slug: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub slug: String,
}

/// Query parameters for notification display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display cart page.
#[instrument(skip(jar))]
pub async fn show(jar: CookieJar, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    let cart = read_cart(&jar);

    CartShowTemplate {
        cart: CartView::from(&cart),
        error: query.error.map(notification_text),
        success: query.success.map(notification_text),
    }
}

/// Map notification codes carried in the query string to display text.
fn notification_text(code: String) -> String {
    match code.as_str() {
        "out_of_stock" => "Sorry. Product is out of stock".to_owned(),
        "not_found" => "That product is no longer available".to_owned(),
        "updated" => "Cart updated!".to_owned(),
        "removed" => "Item removed from cart!".to_owned(),
        other => other.to_owned(),
    }
}

/// Build the line item for a product at the requested quantity.
fn line_for(product: &Product, quantity: u32) -> CartLineItem {
    CartLineItem {
        slug: product.slug.clone(),
        name: product.name.clone(),
        price: product.price,
        quantity,
        image: product.image.clone(),
        count_in_stock: product.stock(),
    }
}

/// Add an item to the cart, or bump the quantity of an existing line.
///
/// Stock is checked against the requested total quantity; on failure the
/// cart cookie is left exactly as it was.
#[instrument(skip(state, jar))]
pub async fn add(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let Some(product) = ProductRepository::new(state.pool())
        .get_by_slug(&form.slug)
        .await?
    else {
        return Ok(Redirect::to("/?error=not_found").into_response());
    };

    let cart = read_cart(&jar);
    let existing = cart
        .items
        .iter()
        .find(|item| item.slug == form.slug)
        .map_or(0, |item| item.quantity);
    let requested = existing + form.quantity.unwrap_or(1).max(1);

    if product.count_in_stock < i32::try_from(requested).unwrap_or(i32::MAX) {
        return Ok(Redirect::to("/cart?error=out_of_stock").into_response());
    }

    let cart = cart.apply(CartAction::AddItem(line_for(&product, requested)));
    let jar = write_cart(jar, &cart);

    Ok((jar, Redirect::to("/cart")).into_response())
}

/// Set the quantity of an existing cart line.
///
/// One stock check per update; the update is rejected client-visible and the
/// cart left unchanged when the requested quantity exceeds stock on hand.
#[instrument(skip(state, jar))]
pub async fn update(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let cart = read_cart(&jar);

    if form.quantity == 0 || !cart.items.iter().any(|item| item.slug == form.slug) {
        return Ok(Redirect::to("/cart").into_response());
    }

    let Some(product) = ProductRepository::new(state.pool())
        .get_by_slug(&form.slug)
        .await?
    else {
        return Ok(Redirect::to("/cart?error=not_found").into_response());
    };

    if product.count_in_stock < i32::try_from(form.quantity).unwrap_or(i32::MAX) {
        return Ok(Redirect::to("/cart?error=out_of_stock").into_response());
    }

    let cart = cart.apply(CartAction::AddItem(line_for(&product, form.quantity)));
    let jar = write_cart(jar, &cart);

    Ok((jar, Redirect::to("/cart?success=updated")).into_response())
}

/// Remove an item from the cart.
#[instrument(skip(jar))]
pub async fn remove(jar: CookieJar, Form(form): Form<RemoveFromCartForm>) -> Response {
    let cart = read_cart(&jar).apply(CartAction::RemoveItem { slug: form.slug });
    let jar = write_cart(jar, &cart);

    (jar, Redirect::to("/cart?success=removed")).into_response()
}
