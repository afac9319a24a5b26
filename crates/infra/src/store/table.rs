use std::collections::BTreeMap;

use sexyboom_core::{DomainError, DomainResult, Entity};

/// Id-ordered collection of one entity type with its own id sequence.
///
/// Ids are handed out monotonically and never reused, even after deletes.
#[derive(Debug)]
pub(crate) struct Table<E: Entity> {
    kind: &'static str,
    rows: BTreeMap<E::Id, E>,
    last_id: u64,
}

impl<E> Table<E>
where
    E: Entity + Clone,
    E::Id: TryFrom<u64, Error = DomainError>,
{
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn get(&self, id: E::Id) -> DomainResult<&E> {
        self.rows.get(&id).ok_or_else(|| self.missing(id))
    }

    pub(crate) fn get_mut(&mut self, id: E::Id) -> DomainResult<&mut E> {
        let kind = self.kind;
        self.rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("{kind} {id}")))
    }

    /// Rows in id order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    pub(crate) fn snapshot(&self) -> Vec<E> {
        self.rows.values().cloned().collect()
    }

    /// Build a row with the next id. The sequence only advances on success.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(E::Id) -> DomainResult<E>) -> DomainResult<E> {
        let id = E::Id::try_from(self.last_id + 1)?;
        let row = build(id)?;
        self.last_id += 1;
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    /// Replace an existing row.
    pub(crate) fn replace(&mut self, row: E) -> DomainResult<()> {
        let slot = self.get_mut(row.id())?;
        *slot = row;
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: E::Id) -> DomainResult<E> {
        self.rows.remove(&id).ok_or_else(|| self.missing(id))
    }

    fn missing(&self, id: E::Id) -> DomainError {
        DomainError::not_found(format!("{} {}", self.kind, id))
    }
}
