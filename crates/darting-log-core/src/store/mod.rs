//! Key-value persistence for catalogs, cases and history.
//!
//! Each collection lives under one key as a whole JSON array. Writes replace
//! the entire value, so every mutation is a read-modify-write of the list.
//! The last write to a key wins.

mod history;
mod memory;
mod records;

pub use history::*;
pub use memory::*;
pub use records::*;

use serde_json::Value;
use thiserror::Error;

use crate::db::DbError;

/// Store key for the drug catalog.
pub const DRUGS_KEY: &str = "drugs";
/// Store key for the species catalog.
pub const SPECIES_KEY: &str = "species";
/// Store key for case records.
pub const CASES_KEY: &str = "cases";
/// Store key for standalone calculator history.
pub const HISTORY_KEY: &str = "history";

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-value key-value store.
///
/// An absent key is a normal state and reads as `None`.
pub trait KeyValueStore {
    /// Read the value last set for `key`.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Replace the value for `key`.
    fn set(&self, key: &str, value: &Value) -> StoreResult<()>;
}

/// Read a JSON array under `key`, treating absence as empty.
pub(crate) fn load_list<T, S>(store: &S, key: &str) -> StoreResult<Vec<T>>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

/// Replace the JSON array under `key`.
pub(crate) fn save_list<T, S>(store: &S, key: &str, items: &[T]) -> StoreResult<()>
where
    T: serde::Serialize,
    S: KeyValueStore + ?Sized,
{
    let value = serde_json::to_value(items)?;
    store.set(key, &value)
}
