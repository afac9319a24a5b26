//! Infrastructure layer: storage for products, clients and sales notes.

pub mod store;

pub use store::{InMemoryStore, NewSalesNote, NewSalesNoteLine, Store, StoreCounts};
