use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use sexyboom_core::ProductId;
use sexyboom_inventory::{
    calculate_profit, calculate_profit_margin, calculate_total_value, get_low_stock_products,
    is_valid_price, search_products_by_name,
};
use sexyboom_products::{ProductDraft, ProductPatch};

use crate::app::errors::ApiError;
use crate::app::{AppServices, dto};

type ApiResult = Result<axum::response::Response, ApiError>;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/inventory-cost", get(inventory_cost))
        .route("/low-stock", get(low_stock))
        .route("/search", get(search))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/:id/profit", get(product_profit))
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> ApiResult {
    let items = services
        .store
        .list_products()?
        .iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    Ok(Json(serde_json::json!({ "items": items })).into_response())
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<ProductDraft>,
) -> ApiResult {
    let product = services.store.create_product(body)?;
    Ok((StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response())
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id: ProductId = id.parse()?;
    let product = services.store.get_product(id)?;
    Ok(Json(dto::product_to_json(&product)).into_response())
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<ProductPatch>,
) -> ApiResult {
    let id: ProductId = id.parse()?;
    let product = services.store.update_product(id, body)?;
    Ok(Json(dto::product_to_json(&product)).into_response())
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id: ProductId = id.parse()?;
    services.store.delete_product(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Σ stock × cost over the whole catalog.
pub async fn inventory_cost(Extension(services): Extension<Arc<AppServices>>) -> ApiResult {
    let products = services.store.list_products()?;
    Ok(Json(serde_json::json!({
        "inventory_cost": calculate_total_value(&products),
    }))
    .into_response())
}

pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::LowStockQuery>,
) -> ApiResult {
    let threshold = query.threshold.unwrap_or(services.low_stock_threshold as f64);
    let products = services.store.list_products()?;
    let items = get_low_stock_products(&products, threshold)
        .into_iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    Ok(Json(serde_json::json!({ "threshold": threshold, "items": items })).into_response())
}

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SearchQuery>,
) -> ApiResult {
    let products = services.store.list_products()?;
    let items = search_products_by_name(&products, &query.q)
        .into_iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    Ok(Json(serde_json::json!({ "items": items })).into_response())
}

pub async fn product_profit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<dto::ProfitQuery>,
) -> ApiResult {
    let id: ProductId = id.parse()?;
    let product = services.store.get_product(id)?;
    let sale_price = query.sale_price.unwrap_or(product.initial_price());
    if !is_valid_price(sale_price) || !sale_price.is_finite() {
        return Err(ApiError::bad_request("sale_price must be a non-negative number"));
    }
    let cost = product.cost();

    Ok(Json(serde_json::json!({
        "product_id": id.get(),
        "cost": cost,
        "sale_price": sale_price,
        "profit": calculate_profit(cost, sale_price),
        "margin": calculate_profit_margin(cost, sale_price),
    }))
    .into_response())
}
