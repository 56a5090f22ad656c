//! Order confirmation handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use primrose_core::{OrderTotals, ShippingAddress};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::order::OrderItem;
use crate::state::AppState;

/// Order line display data.
#[derive(Clone)]
pub struct OrderItemView {
    pub slug: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub line_total: f64,
    pub image: String,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            slug: item.slug.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            line_total: primrose_core::round2(f64::from(item.quantity) * item.price),
            image: item.image.clone(),
        }
    }
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub public_id: String,
    pub placed_at: String,
    pub items: Vec<OrderItemView>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub totals: OrderTotals,
    pub is_paid: bool,
    pub is_delivered: bool,
}

/// Display the confirmation page for one of the user's orders.
///
/// Orders belonging to other users 404 rather than 403 so the public IDs
/// stay unguessable in practice.
#[instrument(skip(state))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(public_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (order, items) = OrderRepository::new(state.pool())
        .get_by_public_id(public_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {public_id}")))?;

    if order.user_id != user.id {
        return Err(AppError::NotFound(format!("order {public_id}")));
    }

    Ok(OrderShowTemplate {
        public_id: order.public_id.to_string(),
        placed_at: order.created_at.format("%B %-d, %Y").to_string(),
        items: items.iter().map(OrderItemView::from).collect(),
        shipping_address: order.shipping_address,
        payment_method: order.payment_method.as_str().to_owned(),
        totals: order.totals,
        is_paid: order.is_paid,
        is_delivered: order.is_delivered,
    })
}
