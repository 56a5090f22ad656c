//! JSON API handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use tracing::instrument;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Stock information for one product.
#[derive(Debug, Serialize)]
pub struct ProductStockResponse {
    pub slug: String,
    pub count_in_stock: i32,
}

/// Return the current stock count for a product.
///
/// One request per quantity update; the cart handlers use the same query
/// server-side before accepting an update.
#[instrument(skip(state))]
pub async fn product_stock(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductStockResponse>> {
    let count_in_stock = ProductRepository::new(state.pool())
        .count_in_stock(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    Ok(Json(ProductStockResponse {
        slug,
        count_in_stock,
    }))
}
