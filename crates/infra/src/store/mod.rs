//! Storage abstraction for the application's records.
//!
//! Records only enter a store through their validating constructors, so every
//! product, client and sales note read back satisfies its invariants.

mod in_memory;
mod table;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sexyboom_clients::{Client, ClientDraft, ClientPatch};
use sexyboom_core::{ClientId, DomainResult, ProductId, SalesNoteId};
use sexyboom_products::{Product, ProductDraft, ProductPatch};
use sexyboom_sales::SalesNote;

pub use in_memory::InMemoryStore;

/// Request to open a sales note.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSalesNote {
    pub client_id: ClientId,
    pub lines: Vec<NewSalesNoteLine>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One requested line: which product, how many, at what unit price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSalesNoteLine {
    pub product_id: ProductId,
    pub quantity: u64,
    pub unit_price: f64,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
}

/// Record counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub clients: usize,
    pub products: usize,
    pub sales_notes: usize,
}

/// Record storage. Every call is atomic with respect to the others.
pub trait Store: Send + Sync {
    fn list_products(&self) -> DomainResult<Vec<Product>>;
    fn get_product(&self, id: ProductId) -> DomainResult<Product>;
    fn create_product(&self, draft: ProductDraft) -> DomainResult<Product>;
    fn update_product(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product>;
    fn delete_product(&self, id: ProductId) -> DomainResult<()>;

    fn list_clients(&self) -> DomainResult<Vec<Client>>;
    fn get_client(&self, id: ClientId) -> DomainResult<Client>;
    /// Fails with a conflict when another client already has the national id.
    fn create_client(&self, draft: ClientDraft) -> DomainResult<Client>;
    fn update_client(&self, id: ClientId, patch: ClientPatch) -> DomainResult<Client>;
    fn delete_client(&self, id: ClientId) -> DomainResult<()>;

    fn list_sales_notes(&self) -> DomainResult<Vec<SalesNote>>;
    fn get_sales_note(&self, id: SalesNoteId) -> DomainResult<SalesNote>;
    /// Open a pending note. The client and every product must exist and each
    /// product must currently cover the quantity requested across all lines.
    /// Stock is not moved.
    fn open_sales_note(&self, request: NewSalesNote, today: NaiveDate) -> DomainResult<SalesNote>;
    /// Mark a note paid and take its quantities out of stock, all or nothing.
    fn confirm_sales_note(&self, id: SalesNoteId, today: NaiveDate) -> DomainResult<SalesNote>;
    fn delete_sales_note(&self, id: SalesNoteId) -> DomainResult<()>;

    fn counts(&self) -> DomainResult<StoreCounts>;
}

impl<S> Store for Arc<S>
where
    S: Store + ?Sized,
{
    fn list_products(&self) -> DomainResult<Vec<Product>> {
        (**self).list_products()
    }

    fn get_product(&self, id: ProductId) -> DomainResult<Product> {
        (**self).get_product(id)
    }

    fn create_product(&self, draft: ProductDraft) -> DomainResult<Product> {
        (**self).create_product(draft)
    }

    fn update_product(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        (**self).update_product(id, patch)
    }

    fn delete_product(&self, id: ProductId) -> DomainResult<()> {
        (**self).delete_product(id)
    }

    fn list_clients(&self) -> DomainResult<Vec<Client>> {
        (**self).list_clients()
    }

    fn get_client(&self, id: ClientId) -> DomainResult<Client> {
        (**self).get_client(id)
    }

    fn create_client(&self, draft: ClientDraft) -> DomainResult<Client> {
        (**self).create_client(draft)
    }

    fn update_client(&self, id: ClientId, patch: ClientPatch) -> DomainResult<Client> {
        (**self).update_client(id, patch)
    }

    fn delete_client(&self, id: ClientId) -> DomainResult<()> {
        (**self).delete_client(id)
    }

    fn list_sales_notes(&self) -> DomainResult<Vec<SalesNote>> {
        (**self).list_sales_notes()
    }

    fn get_sales_note(&self, id: SalesNoteId) -> DomainResult<SalesNote> {
        (**self).get_sales_note(id)
    }

    fn open_sales_note(&self, request: NewSalesNote, today: NaiveDate) -> DomainResult<SalesNote> {
        (**self).open_sales_note(request, today)
    }

    fn confirm_sales_note(&self, id: SalesNoteId, today: NaiveDate) -> DomainResult<SalesNote> {
        (**self).confirm_sales_note(id, today)
    }

    fn delete_sales_note(&self, id: SalesNoteId) -> DomainResult<()> {
        (**self).delete_sales_note(id)
    }

    fn counts(&self) -> DomainResult<StoreCounts> {
        (**self).counts()
    }
}
