//! Filters and lookups. Results borrow from the input and keep its order.

use sexyboom_clients::Client;
use sexyboom_products::Product;

/// Every product whose stock is at or below `threshold`.
///
/// The threshold is any number: a negative one matches nothing, a fractional
/// one matches stock up to its whole part, NaN matches nothing.
pub fn get_low_stock_products(products: &[Product], threshold: f64) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| product.stock() as f64 <= threshold)
        .collect()
}

/// Every product whose name contains `term`, ignoring case.
///
/// Only case is folded (no accent folding), so `"pantalon"` does not match
/// `"Pantalón"`. An empty term matches everything.
pub fn search_products_by_name<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.to_lowercase();
    products
        .iter()
        .filter(|product| product.name().to_lowercase().contains(&term))
        .collect()
}

/// First client whose national id equals `national_id` exactly.
pub fn find_client_by_national_id<'a>(clients: &'a [Client], national_id: &str) -> Option<&'a Client> {
    clients
        .iter()
        .find(|client| client.national_id().as_str() == national_id)
}
