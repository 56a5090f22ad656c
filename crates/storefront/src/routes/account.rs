//! Account overview with order history.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::db::orders::OrderRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::order::Order;
use crate::state::AppState;

/// One row of the order history table.
#[derive(Clone)]
pub struct OrderRowView {
    pub public_id: String,
    pub placed_at: String,
    pub total_price: f64,
    pub is_paid: bool,
    pub is_delivered: bool,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            public_id: order.public_id.to_string(),
            placed_at: order.created_at.format("%Y-%m-%d").to_string(),
            total_price: order.totals.total_price,
            is_paid: order.is_paid,
            is_delivered: order.is_delivered,
        }
    }
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub name: String,
    pub email: String,
    pub orders: Vec<OrderRowView>,
}

/// Display the account overview.
#[instrument(skip(state))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(AccountTemplate {
        name: user.name,
        email: user.email.to_string(),
        orders: orders.iter().map(OrderRowView::from).collect(),
    })
}
