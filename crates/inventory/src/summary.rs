//! Dashboard-level roll-up of the product catalog.

use serde::Serialize;

use sexyboom_products::Product;

use crate::{calculate_total_value, get_low_stock_products};

/// Aggregate figures over a set of products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub product_count: usize,
    /// Saturates at `u64::MAX`.
    pub total_units: u64,
    pub total_value: f64,
    pub low_stock_threshold: u64,
    pub low_stock_count: usize,
}

pub fn summarize(products: &[Product], low_stock_threshold: u64) -> InventorySummary {
    InventorySummary {
        product_count: products.len(),
        total_units: products
            .iter()
            .fold(0u64, |units, product| units.saturating_add(product.stock())),
        total_value: calculate_total_value(products),
        low_stock_threshold,
        low_stock_count: get_low_stock_products(products, low_stock_threshold as f64).len(),
    }
}
