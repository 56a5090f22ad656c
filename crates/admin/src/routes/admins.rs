//! Admin user management routes (super admin only).
//!
//! Creation happens through the CLI (`primrose-cli admin create`); this page
//! is a read-only roster.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::db::admin_users::AdminUserRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSuperAdmin;
use crate::models::AdminUser;
use crate::state::AppState;

/// One row of the admin roster.
#[derive(Clone)]
pub struct AdminRowView {
    pub email: String,
    pub name: String,
    pub role: String,
    pub joined_at: String,
}

impl From<&AdminUser> for AdminRowView {
    fn from(admin: &AdminUser) -> Self {
        Self {
            email: admin.email.to_string(),
            name: admin.name.clone(),
            role: admin.role.to_string(),
            joined_at: admin.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Admin roster page template.
#[derive(Template, WebTemplate)]
#[template(path = "admins/index.html")]
pub struct AdminsIndexTemplate {
    pub admins: Vec<AdminRowView>,
}

/// Display the admin roster.
#[instrument(skip(state, _admin))]
pub async fn index(
    _admin: RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let admins = AdminUserRepository::new(state.pool()).list().await?;

    Ok(AdminsIndexTemplate {
        admins: admins.iter().map(AdminRowView::from).collect(),
    })
}
