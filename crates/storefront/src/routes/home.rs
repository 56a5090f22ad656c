//! Home page: the product grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::instrument;

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Query parameters for notification display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the product grid.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(HomeTemplate {
        products: products.iter().map(ProductCardView::from).collect(),
        error: query.error.map(notification_text),
        success: query.success,
    })
}

/// Map notification codes carried in the query string to display text.
fn notification_text(code: String) -> String {
    match code.as_str() {
        "out_of_stock" => "Sorry. Product is out of stock".to_owned(),
        "not_found" => "That product is no longer available".to_owned(),
        other => other.to_owned(),
    }
}
