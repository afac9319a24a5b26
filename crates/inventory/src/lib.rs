//! Inventory utilities: validation, valuation and lookup over products and clients.
//!
//! Every function here is pure: it takes its whole input as arguments, never
//! mutates it, keeps no state between calls and never fails. Results are
//! sentinels (`false`, `0.0`, an empty `Vec`, `None`) rather than errors.

pub mod calculations;
pub mod search;
pub mod summary;

pub use calculations::{calculate_profit, calculate_profit_margin, calculate_total_value};
pub use search::{find_client_by_national_id, get_low_stock_products, search_products_by_name};
pub use summary::{InventorySummary, summarize};

pub use sexyboom_core::validation::{is_valid_national_id, is_valid_price, is_valid_stock};

#[cfg(test)]
pub(crate) mod fixtures {
    use sexyboom_clients::{Client, ClientDraft};
    use sexyboom_core::{ClientId, ProductId};
    use sexyboom_products::{Product, ProductDraft};

    pub fn product(id: u64, name: &str, stock: u64, cost: f64) -> Product {
        Product::new(
            ProductId::new(id).unwrap(),
            ProductDraft {
                name: name.to_string(),
                stock: stock as f64,
                cost,
                initial_price: cost * 2.0,
            },
        )
        .unwrap()
    }

    pub fn client(id: u64, name: &str, national_id: &str) -> Client {
        Client::new(
            ClientId::new(id).unwrap(),
            ClientDraft {
                name: name.to_string(),
                national_id: national_id.to_string(),
                address: String::new(),
                phone: String::new(),
            },
        )
        .unwrap()
    }
}
