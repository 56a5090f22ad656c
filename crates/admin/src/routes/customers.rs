//! Admin customer routes: storefront users and their login activity.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::db::customers::{CustomerRepository, CustomerSummary, LoginLogEntry};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Number of login attempts shown on the customers page.
const LOGIN_LOG_LIMIT: i64 = 50;

/// One row of the customer table.
#[derive(Clone)]
pub struct CustomerRowView {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub orders_count: i64,
    pub joined_at: String,
}

impl From<&CustomerSummary> for CustomerRowView {
    fn from(customer: &CustomerSummary) -> Self {
        Self {
            id: customer.id,
            email: customer.email.clone(),
            name: customer.name.clone(),
            orders_count: customer.orders_count,
            joined_at: customer.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One row of the login activity table.
#[derive(Clone)]
pub struct LoginRowView {
    pub email: String,
    pub success: bool,
    pub at: String,
}

impl From<&LoginLogEntry> for LoginRowView {
    fn from(entry: &LoginLogEntry) -> Self {
        Self {
            email: entry.email.clone(),
            success: entry.success,
            at: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Customers page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub customers: Vec<CustomerRowView>,
    pub logins: Vec<LoginRowView>,
}

/// Display storefront users and recent login attempts.
#[instrument(skip(state, _admin))]
pub async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = CustomerRepository::new(state.pool());
    let customers = repo.list().await?;
    let logins = repo.recent_logins(LOGIN_LOG_LIMIT).await?;

    Ok(CustomersIndexTemplate {
        customers: customers.iter().map(CustomerRowView::from).collect(),
        logins: logins.iter().map(LoginRowView::from).collect(),
    })
}
