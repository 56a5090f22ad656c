//! Admin dashboard: store-wide counters and recent orders.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::db::orders::OrderRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::routes::orders::OrderRowView;
use crate::state::AppState;

/// Number of orders shown on the dashboard.
const RECENT_ORDERS: i64 = 5;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub orders_count: i64,
    pub users_count: i64,
    pub products_count: i64,
    pub revenue: f64,
    pub recent_orders: Vec<OrderRowView>,
}

/// Display the dashboard.
#[instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn index(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = OrderRepository::new(state.pool());
    let stats = repo.stats().await?;
    let recent = repo.recent(RECENT_ORDERS).await?;

    Ok(DashboardTemplate {
        admin_name: admin.0.name,
        orders_count: stats.orders_count,
        users_count: stats.users_count,
        products_count: stats.products_count,
        revenue: stats.revenue,
        recent_orders: recent.iter().map(OrderRowView::from).collect(),
    })
}
