use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use sexyboom_clients::{Client, ClientDraft, ClientPatch};
use sexyboom_core::{ClientId, DomainError, DomainResult, Entity, ProductId, SalesNoteId};
use sexyboom_products::{Product, ProductDraft, ProductPatch};
use sexyboom_sales::{SalesNote, SalesNoteLine};

use super::table::Table;
use super::{NewSalesNote, Store, StoreCounts};

#[derive(Debug)]
struct Tables {
    products: Table<Product>,
    clients: Table<Client>,
    sales_notes: Table<SalesNote>,
}

/// Process-local store for dev/tests. Nothing survives a restart.
///
/// A single lock guards all tables, so operations that touch several of them
/// (confirming a sale moves stock and changes the note) are atomic.
#[derive(Debug)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables {
                products: Table::new("product"),
                clients: Table::new("client"),
                sales_notes: Table::new("sales note"),
            }),
        }
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| DomainError::invariant("store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| DomainError::invariant("store lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_unique_national_id(clients: &Table<Client>, national_id: &str, except: Option<ClientId>) -> DomainResult<()> {
    let taken = clients
        .values()
        .any(|c| c.national_id().as_str() == national_id && Some(c.id()) != except);
    if taken {
        return Err(DomainError::conflict(format!(
            "a client with national id {national_id} already exists"
        )));
    }
    Ok(())
}

/// Total quantity per product across `lines`.
fn quantities_by_product(lines: impl IntoIterator<Item = (ProductId, u64)>) -> DomainResult<BTreeMap<ProductId, u64>> {
    let mut totals = BTreeMap::new();
    for (product_id, quantity) in lines {
        let total: &mut u64 = totals.entry(product_id).or_default();
        *total = total.checked_add(quantity).ok_or_else(|| {
            DomainError::validation(format!("total quantity for product {product_id} is too large"))
        })?;
    }
    Ok(totals)
}

impl Store for InMemoryStore {
    fn list_products(&self) -> DomainResult<Vec<Product>> {
        Ok(self.read()?.products.snapshot())
    }

    fn get_product(&self, id: ProductId) -> DomainResult<Product> {
        self.read()?.products.get(id).cloned()
    }

    fn create_product(&self, draft: ProductDraft) -> DomainResult<Product> {
        let product = self.write()?.products.insert_with(|id| Product::new(id, draft))?;
        tracing::info!(product_id = %product.id(), name = product.name(), "product created");
        Ok(product)
    }

    fn update_product(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let mut tables = self.write()?;
        let updated = tables.products.get(id)?.apply_patch(patch)?;
        tables.products.replace(updated.clone())?;
        tracing::info!(product_id = %id, "product updated");
        Ok(updated)
    }

    fn delete_product(&self, id: ProductId) -> DomainResult<()> {
        self.write()?.products.remove(id)?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    fn list_clients(&self) -> DomainResult<Vec<Client>> {
        Ok(self.read()?.clients.snapshot())
    }

    fn get_client(&self, id: ClientId) -> DomainResult<Client> {
        self.read()?.clients.get(id).cloned()
    }

    fn create_client(&self, draft: ClientDraft) -> DomainResult<Client> {
        let mut tables = self.write()?;
        ensure_unique_national_id(&tables.clients, &draft.national_id, None)?;
        let client = tables.clients.insert_with(|id| Client::new(id, draft))?;
        tracing::info!(client_id = %client.id(), "client created");
        Ok(client)
    }

    fn update_client(&self, id: ClientId, patch: ClientPatch) -> DomainResult<Client> {
        let mut tables = self.write()?;
        let updated = tables.clients.get(id)?.apply_patch(patch)?;
        ensure_unique_national_id(&tables.clients, updated.national_id().as_str(), Some(id))?;
        tables.clients.replace(updated.clone())?;
        tracing::info!(client_id = %id, "client updated");
        Ok(updated)
    }

    fn delete_client(&self, id: ClientId) -> DomainResult<()> {
        self.write()?.clients.remove(id)?;
        tracing::info!(client_id = %id, "client deleted");
        Ok(())
    }

    fn list_sales_notes(&self) -> DomainResult<Vec<SalesNote>> {
        Ok(self.read()?.sales_notes.snapshot())
    }

    fn get_sales_note(&self, id: SalesNoteId) -> DomainResult<SalesNote> {
        self.read()?.sales_notes.get(id).cloned()
    }

    fn open_sales_note(&self, request: NewSalesNote, today: NaiveDate) -> DomainResult<SalesNote> {
        let mut tables = self.write()?;
        let Tables {
            products,
            clients,
            sales_notes,
        } = &mut *tables;

        let client = clients.get(request.client_id)?;
        let lines = request
            .lines
            .iter()
            .map(|line| {
                let product = products.get(line.product_id)?;
                SalesNoteLine::new(product, line.quantity, line.unit_price, line.size.clone(), line.color.clone())
            })
            .collect::<DomainResult<Vec<_>>>()?;

        // Lines naming the same product must be covered together.
        let totals = quantities_by_product(request.lines.iter().map(|l| (l.product_id, l.quantity)))?;
        for (product_id, quantity) in &totals {
            products.get(*product_id)?.ensure_available(*quantity)?;
        }

        let note = sales_notes.insert_with(|id| SalesNote::open(id, client, lines, request.notes, today))?;
        tracing::info!(
            sales_note_id = %note.id(),
            client_id = %note.client_id(),
            total = note.total(),
            "sales note opened"
        );
        Ok(note)
    }

    fn confirm_sales_note(&self, id: SalesNoteId, today: NaiveDate) -> DomainResult<SalesNote> {
        let mut tables = self.write()?;
        let Tables {
            products,
            sales_notes,
            ..
        } = &mut *tables;

        let mut note = sales_notes.get(id)?.clone();
        note.confirm(today)?;

        // Check every line before touching any stock so a failure leaves the
        // store unchanged. Lines naming the same product are added up.
        let required = quantities_by_product(note.lines().iter().map(|l| (l.product_id, l.quantity)))?;
        for (product_id, quantity) in &required {
            products.get(*product_id)?.ensure_available(*quantity)?;
        }

        for (product_id, quantity) in required {
            products.get_mut(product_id)?.take_stock(quantity)?;
        }
        sales_notes.replace(note.clone())?;

        tracing::info!(sales_note_id = %id, total = note.total(), "sales note confirmed");
        Ok(note)
    }

    fn delete_sales_note(&self, id: SalesNoteId) -> DomainResult<()> {
        self.write()?.sales_notes.remove(id)?;
        tracing::info!(sales_note_id = %id, "sales note deleted");
        Ok(())
    }

    fn counts(&self) -> DomainResult<StoreCounts> {
        let tables = self.read()?;
        Ok(StoreCounts {
            clients: tables.clients.len(),
            products: tables.products.len(),
            sales_notes: tables.sales_notes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewSalesNoteLine;
    use sexyboom_products::MAX_STOCK;
    use sexyboom_sales::PaymentStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn product_draft(name: &str, stock: f64, cost: f64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            stock,
            cost,
            initial_price: cost * 2.0,
        }
    }

    fn client_draft(name: &str, national_id: &str) -> ClientDraft {
        ClientDraft {
            name: name.to_string(),
            national_id: national_id.to_string(),
            address: "Av. Arequipa 123".to_string(),
            phone: "987654321".to_string(),
        }
    }

    fn line(product_id: ProductId, quantity: u64, unit_price: f64) -> NewSalesNoteLine {
        NewSalesNoteLine {
            product_id,
            quantity,
            unit_price,
            size: "M".to_string(),
            color: "Rojo".to_string(),
        }
    }

    fn seeded() -> (InMemoryStore, ClientId, ProductId, ProductId) {
        let store = InMemoryStore::new();
        let client = store.create_client(client_draft("Ana Torres", "12345678")).unwrap();
        let shirt = store.create_product(product_draft("Camisa Roja", 10.0, 20.0)).unwrap();
        let shoes = store.create_product(product_draft("Zapatos Negros", 2.0, 60.0)).unwrap();
        (store, client.id(), shirt.id(), shoes.id())
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let store = InMemoryStore::new();
        let a = store.create_product(product_draft("A", 1.0, 1.0)).unwrap();
        let b = store.create_product(product_draft("B", 1.0, 1.0)).unwrap();
        assert_eq!((a.id().get(), b.id().get()), (1, 2));

        store.delete_product(b.id()).unwrap();
        let c = store.create_product(product_draft("C", 1.0, 1.0)).unwrap();
        assert_eq!(c.id().get(), 3);
    }

    #[test]
    fn invalid_records_are_not_stored() {
        let store = InMemoryStore::new();
        let err = store.create_product(product_draft("A", 3.5, 1.0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(store.list_products().unwrap().is_empty());

        // A rejected insert does not burn an id.
        let ok = store.create_product(product_draft("A", 3.0, 1.0)).unwrap();
        assert_eq!(ok.id().get(), 1);

        let err = store.create_client(client_draft("Luis", "1234")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.counts().unwrap().clients, 0);
    }

    #[test]
    fn update_and_delete_missing_rows_are_not_found() {
        let store = InMemoryStore::new();
        let id = ProductId::new(9).unwrap();
        assert!(matches!(
            store.update_product(id, ProductPatch::default()),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(store.delete_product(id), Err(DomainError::NotFound(_))));
        assert!(matches!(
            store.get_client(ClientId::new(1).unwrap()),
            Err(DomainError::NotFound(msg)) if msg == "client 1"
        ));
    }

    #[test]
    fn update_product_merges_patch() {
        let (store, _, shirt, _) = seeded();
        let updated = store
            .update_product(
                shirt,
                ProductPatch {
                    stock: Some(4.0),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.stock(), 4);
        assert_eq!(store.get_product(shirt).unwrap().stock(), 4);
        assert_eq!(store.get_product(shirt).unwrap().name(), "Camisa Roja");
    }

    #[test]
    fn national_ids_are_unique() {
        let (store, ana, _, _) = seeded();
        let err = store.create_client(client_draft("Otra Ana", "12345678")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let luis = store.create_client(client_draft("Luis", "87654321")).unwrap();
        let err = store
            .update_client(
                luis.id(),
                ClientPatch {
                    national_id: Some("12345678".to_string()),
                    ..ClientPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Re-saving a client with its own id is fine.
        store
            .update_client(
                ana,
                ClientPatch {
                    national_id: Some("12345678".to_string()),
                    phone: Some("999".to_string()),
                    ..ClientPatch::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn open_sales_note_checks_references_and_stock_without_moving_it() {
        let (store, client, shirt, shoes) = seeded();
        let note = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client,
                    lines: vec![line(shirt, 2, 50.0), line(shoes, 1, 25.0)],
                    notes: Some("Nota de prueba".to_string()),
                },
                date(2024, 3, 1),
            )
            .unwrap();

        assert_eq!(note.id().get(), 1);
        assert_eq!(note.total(), 125.0);
        assert_eq!(note.status(), PaymentStatus::Pending);
        assert_eq!(store.get_product(shirt).unwrap().stock(), 10);

        let missing_client = store.open_sales_note(
            NewSalesNote {
                client_id: ClientId::new(99).unwrap(),
                lines: vec![line(shirt, 1, 1.0)],
                notes: None,
            },
            date(2024, 3, 1),
        );
        assert!(matches!(missing_client, Err(DomainError::NotFound(_))));

        let too_many = store.open_sales_note(
            NewSalesNote {
                client_id: client,
                lines: vec![line(shoes, 3, 1.0)],
                notes: None,
            },
            date(2024, 3, 1),
        );
        assert!(matches!(too_many, Err(DomainError::InsufficientStock { .. })));
        assert_eq!(store.counts().unwrap().sales_notes, 1);
    }

    #[test]
    fn confirm_moves_stock_and_marks_paid() {
        let (store, client, shirt, shoes) = seeded();
        let note = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client,
                    lines: vec![line(shirt, 2, 50.0), line(shoes, 1, 90.0)],
                    notes: None,
                },
                date(2024, 3, 1),
            )
            .unwrap();

        let confirmed = store.confirm_sales_note(note.id(), date(2024, 3, 2)).unwrap();
        assert!(confirmed.is_paid());
        assert_eq!(confirmed.sold_on(), Some(date(2024, 3, 2)));
        assert_eq!(store.get_product(shirt).unwrap().stock(), 8);
        assert_eq!(store.get_product(shoes).unwrap().stock(), 1);
        assert!(store.get_sales_note(note.id()).unwrap().is_paid());

        let again = store.confirm_sales_note(note.id(), date(2024, 3, 3));
        assert!(matches!(again, Err(DomainError::Conflict(_))));
        assert_eq!(store.get_product(shirt).unwrap().stock(), 8);
    }

    #[test]
    fn confirm_is_all_or_nothing() {
        let (store, client, shirt, shoes) = seeded();
        let first = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client,
                    lines: vec![line(shoes, 2, 90.0)],
                    notes: None,
                },
                date(2024, 3, 1),
            )
            .unwrap();
        let second = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client,
                    lines: vec![line(shirt, 3, 50.0), line(shoes, 1, 90.0)],
                    notes: None,
                },
                date(2024, 3, 1),
            )
            .unwrap();

        store.confirm_sales_note(first.id(), date(2024, 3, 2)).unwrap();
        assert_eq!(store.get_product(shoes).unwrap().stock(), 0);

        let err = store.confirm_sales_note(second.id(), date(2024, 3, 2)).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Zapatos Negros", 0, 1));
        // The shirt line was not applied either.
        assert_eq!(store.get_product(shirt).unwrap().stock(), 10);
        assert!(!store.get_sales_note(second.id()).unwrap().is_paid());
    }

    #[test]
    fn open_adds_up_repeated_products() {
        let (store, client, _, shoes) = seeded();
        let err = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client,
                    lines: vec![line(shoes, 2, 90.0), line(shoes, 1, 90.0)],
                    notes: None,
                },
                date(2024, 3, 1),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Zapatos Negros", 2, 3));
        assert_eq!(store.counts().unwrap().sales_notes, 0);
    }

    #[test]
    fn confirm_adds_up_repeated_products() {
        let (store, client, _, shoes) = seeded();
        let note = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client,
                    lines: vec![line(shoes, 1, 90.0), line(shoes, 1, 90.0)],
                    notes: None,
                },
                date(2024, 3, 1),
            )
            .unwrap();
        store
            .update_product(
                shoes,
                ProductPatch {
                    stock: Some(1.0),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        let err = store.confirm_sales_note(note.id(), date(2024, 3, 2)).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Zapatos Negros", 1, 2));
        assert_eq!(store.get_product(shoes).unwrap().stock(), 1);
    }

    #[test]
    fn huge_repeated_quantities_are_rejected_without_breaking_the_store() {
        let store = InMemoryStore::new();
        let client = store.create_client(client_draft("Ana Torres", "12345678")).unwrap();
        let bulk = store.create_product(product_draft("Botones", MAX_STOCK as f64, 0.1)).unwrap();

        // Each line fits the stock; together they would pass u64::MAX.
        let lines = vec![line(bulk.id(), MAX_STOCK, 0.5); 2100];
        let err = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client.id(),
                    lines,
                    notes: None,
                },
                date(2024, 3, 1),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert_eq!(store.list_products().unwrap().len(), 1);
        assert_eq!(store.get_product(bulk.id()).unwrap().stock(), MAX_STOCK);
    }

    #[test]
    fn quantities_by_product_refuses_to_overflow() {
        let id = ProductId::new(1).unwrap();
        let err = quantities_by_product([(id, u64::MAX), (id, 1)]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let other = ProductId::new(2).unwrap();
        let totals = quantities_by_product([(id, 2), (other, 1), (id, 3)]).unwrap();
        assert_eq!(totals.get(&id), Some(&5));
        assert_eq!(totals.get(&other), Some(&1));
    }

    #[test]
    fn poisoned_lock_is_reported_not_hidden() {
        let (store, _, shirt, _) = seeded();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.write().unwrap();
            panic!("writer died");
        }));

        let poisoned = DomainError::invariant("store lock poisoned");
        assert_eq!(store.list_products(), Err(poisoned.clone()));
        assert_eq!(store.list_clients(), Err(poisoned.clone()));
        assert_eq!(store.list_sales_notes(), Err(poisoned.clone()));
        assert_eq!(store.counts(), Err(poisoned.clone()));
        assert_eq!(store.get_product(shirt), Err(poisoned));
    }

    #[test]
    fn confirm_fails_when_a_product_was_deleted() {
        let (store, client, shirt, _) = seeded();
        let note = store
            .open_sales_note(
                NewSalesNote {
                    client_id: client,
                    lines: vec![line(shirt, 1, 50.0)],
                    notes: None,
                },
                date(2024, 3, 1),
            )
            .unwrap();
        store.delete_product(shirt).unwrap();
        assert!(matches!(
            store.confirm_sales_note(note.id(), date(2024, 3, 2)),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn counts_track_every_table() {
        let (store, _, _, _) = seeded();
        assert_eq!(
            store.counts().unwrap(),
            StoreCounts {
                clients: 1,
                products: 2,
                sales_notes: 0
            }
        );
    }

    #[test]
    fn new_sales_note_deserializes_from_json() {
        let req: NewSalesNote = serde_json::from_str(
            r#"{"client_id":1,"lines":[{"product_id":2,"quantity":3,"unit_price":50.0}]}"#,
        )
        .unwrap();
        assert_eq!(req.client_id.get(), 1);
        assert_eq!(req.lines[0].size, "");
        assert_eq!(req.notes, None);
    }
}
