use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use sexyboom_inventory::summarize;

use crate::app::AppServices;
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new().route("/stats", get(stats))
}

pub async fn stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<axum::response::Response, ApiError> {
    let counts = services.store.counts()?;
    let products = services.store.list_products()?;
    let inventory = summarize(&products, services.low_stock_threshold);

    Ok(Json(serde_json::json!({
        "total_clients": counts.clients,
        "total_products": counts.products,
        "total_sales_notes": counts.sales_notes,
        "inventory_cost": inventory.total_value,
        "inventory": inventory,
    }))
    .into_response())
}
