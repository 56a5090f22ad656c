//! Admin order management routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use primrose_core::{OrderId, round2};

use crate::db::RepositoryError;
use crate::db::orders::{OrderLine, OrderRepository, OrderSummary};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::routes::require_write;
use crate::state::AppState;

/// One row of the order table.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: i32,
    pub public_id: String,
    pub user_email: String,
    pub placed_at: String,
    pub total_price: f64,
    pub is_paid: bool,
    pub is_delivered: bool,
}

impl From<&OrderSummary> for OrderRowView {
    fn from(order: &OrderSummary) -> Self {
        Self {
            id: order.id,
            public_id: order.public_id.to_string(),
            user_email: order.user_email.clone(),
            placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            total_price: order.total_price,
            is_paid: order.is_paid,
            is_delivered: order.is_delivered,
        }
    }
}

/// One order line on the detail page.
#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub line_total: f64,
}

impl From<&OrderLine> for OrderLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            line_total: round2(f64::from(line.quantity) * line.price),
        }
    }
}

/// Order list page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderRowView>,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub id: i32,
    pub public_id: String,
    pub user_email: String,
    pub placed_at: String,
    pub shipping_line: String,
    pub payment_method: String,
    pub items_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub is_delivered: bool,
    pub lines: Vec<OrderLineView>,
    pub can_write: bool,
}

/// Display the order list.
#[instrument(skip(state, _admin))]
pub async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool()).list().await?;

    Ok(OrdersIndexTemplate {
        orders: orders.iter().map(OrderRowView::from).collect(),
    })
}

/// Display one order.
#[instrument(skip(state, admin))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let (order, lines) = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(OrderShowTemplate {
        id: order.id,
        public_id: order.public_id.to_string(),
        user_email: order.user_email,
        placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
        shipping_line: format!(
            "{}, {}, {}, {}, {}",
            order.full_name, order.address, order.city, order.postal_code, order.country
        ),
        payment_method: order.payment_method,
        items_price: order.items_price,
        shipping_price: order.shipping_price,
        tax_price: order.tax_price,
        total_price: order.total_price,
        is_paid: order.is_paid,
        is_delivered: order.is_delivered,
        lines: lines.iter().map(OrderLineView::from).collect(),
        can_write: admin.role.can_write(),
    })
}

/// Record payment for an order.
#[instrument(skip(state, admin))]
pub async fn mark_paid(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response> {
    require_write(&admin)?;

    match OrderRepository::new(state.pool())
        .mark_paid(OrderId::new(id))
        .await
    {
        Ok(()) => {
            tracing::info!(order_id = id, "Order marked paid");
            Ok(Redirect::to(&format!("/orders/{id}")).into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("order {id}"))),
        Err(other) => Err(other.into()),
    }
}

/// Record delivery for an order.
#[instrument(skip(state, admin))]
pub async fn mark_delivered(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response> {
    require_write(&admin)?;

    match OrderRepository::new(state.pool())
        .mark_delivered(OrderId::new(id))
        .await
    {
        Ok(()) => {
            tracing::info!(order_id = id, "Order marked delivered");
            Ok(Redirect::to(&format!("/orders/{id}")).into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("order {id}"))),
        Err(other) => Err(other.into()),
    }
}
