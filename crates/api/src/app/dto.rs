use serde::Deserialize;

use sexyboom_clients::Client;
use sexyboom_core::Entity;
use sexyboom_products::Product;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    /// Any number; falls back to the configured threshold.
    pub threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfitQuery {
    /// Falls back to the product's initial price.
    pub sale_price: Option<f64>,
}

/// Dates as `YYYY-MM-DD`; both required. The text filters are optional.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Part of the client name.
    pub client: Option<String>,
    /// Part of the note id.
    pub id: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id().get(),
        "name": p.name(),
        "stock": p.stock(),
        "cost": p.cost(),
        "initial_price": p.initial_price(),
    })
}

pub fn client_to_json(c: &Client) -> serde_json::Value {
    serde_json::json!({
        "id": c.id().get(),
        "name": c.name(),
        "national_id": c.national_id().as_str(),
        "address": c.address(),
        "phone": c.phone(),
    })
}
