//! Products domain module.
//!
//! This crate contains the product record and its business rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{MAX_STOCK, Product, ProductDraft, ProductPatch};
