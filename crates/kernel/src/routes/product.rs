//! Product catalog routes.
//!
//! Reads are public. Writes require an [`AdminUser`].

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::helpers::{DataResponse, MessageResponse, parse_id};
use crate::auth::AdminUser;
use crate::catalog::{CatalogCriteria, CatalogParams, Facet, FacetDimension, PageMeta, page_size};
use crate::error::{AppError, AppResult, ResultExt};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::state::AppState;

const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Catalog page response.
#[derive(Debug, Serialize)]
struct PaginatedResponse {
    success: bool,
    data: Vec<Product>,
    pagination: PageMeta,
}

/// Query parameters for the featured listing.
#[derive(Debug, Deserialize)]
struct FeaturedParams {
    limit: Option<String>,
}

/// Create the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/featured", get(featured_products))
        .route("/api/products/categories", get(category_facets))
        .route("/api/products/brands", get(brand_facets))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List products matching the query, one page at a time.
async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<CatalogParams>, QueryRejection>,
) -> AppResult<Json<PaginatedResponse>> {
    let Query(params) =
        params.map_err(|e| AppError::bad_request("Invalid catalog query", e.body_text()))?;

    let criteria = CatalogCriteria::from_params(&params, state.catalog().settings())
        .map_err(|e| AppError::bad_request("Invalid catalog query", e.to_string()))?;

    let page = state
        .catalog()
        .list(&criteria)
        .await
        .or_internal("Error fetching products")?;

    Ok(Json(PaginatedResponse {
        success: true,
        data: page.items,
        pagination: page.meta,
    }))
}

/// Highest-rated featured products.
async fn featured_products(
    State(state): State<AppState>,
    params: Result<Query<FeaturedParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let Query(params) =
        params.map_err(|e| AppError::bad_request("Invalid featured query", e.body_text()))?;

    let settings = state.catalog().settings();
    let limit = page_size(
        &params.limit,
        settings.featured_default_limit,
        settings.max_page_size,
    )
    .map_err(|e| AppError::bad_request("Invalid featured query", e.to_string()))?;

    let products = state
        .catalog()
        .featured(limit)
        .await
        .or_internal("Error fetching featured products")?;

    Ok(Json(DataResponse::new(products)))
}

/// Product counts and average price per category.
async fn category_facets(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Facet>>>> {
    let facets = state
        .catalog()
        .facets(FacetDimension::Category)
        .await
        .or_internal("Error fetching categories")?;

    Ok(Json(DataResponse::new(facets)))
}

/// Product counts per brand.
async fn brand_facets(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Facet>>>> {
    let facets = state
        .catalog()
        .facets(FacetDimension::Brand)
        .await
        .or_internal("Error fetching brands")?;

    Ok(Json(DataResponse::new(facets)))
}

/// Fetch one product.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Product>>> {
    let id = parse_id(&id, PRODUCT_NOT_FOUND)?;

    let product = Product::find_by_id(state.db(), id)
        .await
        .or_internal("Error fetching product")?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;

    Ok(Json(DataResponse::new(product)))
}

/// Create a product.
async fn create_product(
    admin: AdminUser,
    State(state): State<AppState>,
    body: Result<Json<CreateProduct>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    let Json(input) =
        body.map_err(|e| AppError::bad_request("Error creating product", e.body_text()))?;

    let product = Product::create(state.db(), input)
        .await
        .map_err(|e| AppError::from_write("Error creating product", e))?;

    info!(admin_id = %admin.user().id, product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// Apply a partial update to a product.
async fn update_product(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProduct>, JsonRejection>,
) -> AppResult<Json<DataResponse<Product>>> {
    let id = parse_id(&id, PRODUCT_NOT_FOUND)?;
    let Json(input) =
        body.map_err(|e| AppError::bad_request("Error updating product", e.body_text()))?;

    let product = Product::update(state.db(), id, input)
        .await
        .map_err(|e| AppError::from_write("Error updating product", e))?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;

    info!(admin_id = %admin.user().id, product_id = %id, "product updated");

    Ok(Json(DataResponse::new(product)))
}

/// Delete a product.
async fn delete_product(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, PRODUCT_NOT_FOUND)?;

    let deleted = Product::delete(state.db(), id)
        .await
        .or_internal("Error deleting product")?;
    if !deleted {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND));
    }

    info!(admin_id = %admin.user().id, product_id = %id, "product deleted");

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
