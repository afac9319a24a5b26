//! Valuation and profit formulas.

use sexyboom_products::Product;

/// Total acquisition cost of the inventory on hand: Σ `stock × cost`.
///
/// An empty slice yields `0.0`. No rounding is applied; currency display
/// rounding is the caller's concern.
pub fn calculate_total_value(products: &[Product]) -> f64 {
    products
        .iter()
        .fold(0.0, |total, product| total + product.stock() as f64 * product.cost())
}

/// Profit of selling at `sale_price` something that cost `cost`.
///
/// Negative results are losses. Inputs are not validated.
pub fn calculate_profit(cost: f64, sale_price: f64) -> f64 {
    sale_price - cost
}

/// Profit as a percentage of cost: `(sale_price - cost) / cost × 100`.
///
/// Policy: when `cost` is exactly zero this returns `0.0`. A margin over zero
/// cost is undefined; the zero is a product decision kept for compatibility,
/// not a derived identity.
pub fn calculate_profit_margin(cost: f64, sale_price: f64) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    (calculate_profit(cost, sale_price) / cost) * 100.0
}
