//! Admin product management routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use primrose_core::ProductId;

use crate::db::RepositoryError;
use crate::db::catalog::{CatalogProduct, CatalogRepository, ProductInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::routes::require_write;
use crate::state::AppState;

/// Product form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub price: f64,
    pub count_in_stock: i32,
    pub description: String,
}

impl ProductForm {
    fn validate(self) -> Result<ProductInput> {
        if self.slug.trim().is_empty() || self.name.trim().is_empty() {
            return Err(AppError::BadRequest("slug and name are required".to_owned()));
        }
        if self.price < 0.0 {
            return Err(AppError::BadRequest("price cannot be negative".to_owned()));
        }
        if self.count_in_stock < 0 {
            return Err(AppError::BadRequest("stock cannot be negative".to_owned()));
        }

        Ok(ProductInput {
            slug: self.slug.trim().to_owned(),
            name: self.name.trim().to_owned(),
            category: self.category.trim().to_owned(),
            brand: self.brand.trim().to_owned(),
            image: self.image.trim().to_owned(),
            price: self.price,
            count_in_stock: self.count_in_stock,
            description: self.description.trim().to_owned(),
        })
    }
}

/// One row of the product table.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub count_in_stock: i32,
}

impl From<&CatalogProduct> for ProductRowView {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            id: product.id,
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            count_in_stock: product.count_in_stock,
        }
    }
}

/// Editable form values.
#[derive(Clone, Default)]
pub struct ProductFormView {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub price: f64,
    pub count_in_stock: i32,
    pub description: String,
}

impl From<&CatalogProduct> for ProductFormView {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            price: product.price,
            count_in_stock: product.count_in_stock,
            description: product.description.clone(),
        }
    }
}

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductRowView>,
}

/// Product form page template, shared by create and edit.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    /// Form post target: `/products` for create, `/products/{id}` for edit.
    pub action: String,
    pub values: ProductFormView,
}

/// Display the product list.
#[instrument(skip(state, _admin))]
pub async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let products = CatalogRepository::new(state.pool()).list().await?;

    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductRowView::from).collect(),
    })
}

/// Display the new product form.
#[instrument(skip(admin))]
pub async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> Result<impl IntoResponse> {
    require_write(&admin)?;

    Ok(ProductFormTemplate {
        action: "/products".to_owned(),
        values: ProductFormView::default(),
    })
}

/// Create a product.
#[instrument(skip(state, admin, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    require_write(&admin)?;

    let input = form.validate()?;
    match CatalogRepository::new(state.pool()).create(&input).await {
        Ok(product) => {
            tracing::info!(slug = %product.slug, "Product created");
            Ok(Redirect::to("/products").into_response())
        }
        Err(RepositoryError::Conflict(msg)) => Err(AppError::BadRequest(msg)),
        Err(other) => Err(other.into()),
    }
}

/// Display the edit form for a product.
#[instrument(skip(state, admin))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    require_write(&admin)?;

    let product = CatalogRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductFormTemplate {
        action: format!("/products/{id}"),
        values: ProductFormView::from(&product),
    })
}

/// Update a product.
#[instrument(skip(state, admin, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    require_write(&admin)?;

    let input = form.validate()?;
    match CatalogRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await
    {
        Ok(_) => Ok(Redirect::to("/products").into_response()),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("product {id}"))),
        Err(RepositoryError::Conflict(msg)) => Err(AppError::BadRequest(msg)),
        Err(other) => Err(other.into()),
    }
}

/// Delete a product.
#[instrument(skip(state, admin))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response> {
    require_write(&admin)?;

    let deleted = CatalogRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    tracing::info!(product_id = id, "Product deleted");
    Ok(Redirect::to("/products").into_response())
}
