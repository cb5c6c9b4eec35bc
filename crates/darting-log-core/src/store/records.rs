//! Typed, identifier-keyed collections over a [`KeyValueStore`].

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{load_list, save_list, KeyValueStore, StoreResult, CASES_KEY, DRUGS_KEY, SPECIES_KEY};
use crate::models::{Case, Drug, Species};

/// A record stored in an identifier-keyed collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Store key holding the collection.
    const STORE_KEY: &'static str;

    /// Stable identifier.
    fn id(&self) -> &str;
}

impl Record for Drug {
    const STORE_KEY: &'static str = DRUGS_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Species {
    const STORE_KEY: &'static str = SPECIES_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Case {
    const STORE_KEY: &'static str = CASES_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered collection of records of one type.
pub struct RecordStore<'a, T, S: ?Sized> {
    store: &'a S,
    _record: PhantomData<T>,
}

/// Drug catalog over a store.
pub fn drugs<S: KeyValueStore + ?Sized>(store: &S) -> RecordStore<'_, Drug, S> {
    RecordStore::new(store)
}

/// Species catalog over a store.
pub fn species<S: KeyValueStore + ?Sized>(store: &S) -> RecordStore<'_, Species, S> {
    RecordStore::new(store)
}

/// Case records over a store.
pub fn cases<S: KeyValueStore + ?Sized>(store: &S) -> RecordStore<'_, Case, S> {
    RecordStore::new(store)
}

impl<'a, T: Record, S: KeyValueStore + ?Sized> RecordStore<'a, T, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// All records in stored order.
    pub fn list(&self) -> StoreResult<Vec<T>> {
        load_list(self.store, T::STORE_KEY)
    }

    /// Get a record by identifier.
    pub fn get(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.list()?.into_iter().find(|r| r.id() == id))
    }

    /// Replace the record with the same identifier, or append it.
    ///
    /// Returns true if an existing record was replaced.
    pub fn upsert(&self, record: &T) -> StoreResult<bool> {
        let mut records = self.list()?;
        let replaced = match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                *existing = record.clone();
                true
            }
            None => {
                records.push(record.clone());
                false
            }
        };
        save_list(self.store, T::STORE_KEY, &records)?;

        tracing::info!(
            collection = T::STORE_KEY,
            id = record.id(),
            replaced,
            "Record saved"
        );
        Ok(replaced)
    }

    /// Delete a record. Returns true if one was removed.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        save_list(self.store, T::STORE_KEY, &records)?;

        tracing::info!(collection = T::STORE_KEY, id, "Record deleted");
        Ok(true)
    }

    /// Replace the whole collection.
    pub fn replace_all(&self, records: &[T]) -> StoreResult<()> {
        save_list(self.store, T::STORE_KEY, records)
    }
}

impl<S: KeyValueStore + ?Sized> RecordStore<'_, Case, S> {
    /// Cases ordered by date, newest first. Stored order breaks ties.
    pub fn list_by_date(&self) -> StoreResult<Vec<Case>> {
        let mut cases = self.list()?;
        cases.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(cases)
    }
}
