//! Export of catalogs and history.

use serde::{Deserialize, Serialize};

use crate::models::{Drug, HistoryEntry, Species};
use crate::store::{drugs, species, HistoryLog, KeyValueStore};

use super::TransferResult;

/// Full export document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportDocument {
    pub drugs: Vec<Drug>,
    pub species: Vec<Species>,
    pub history: Vec<HistoryEntry>,
}

impl ExportDocument {
    /// Snapshot the catalogs and history from a store.
    pub fn collect<S: KeyValueStore + ?Sized>(store: &S) -> TransferResult<Self> {
        let document = Self {
            drugs: drugs(store).list()?,
            species: species(store).list()?,
            history: HistoryLog::new(store).list()?,
        };
        tracing::info!(
            drugs = document.drugs.len(),
            species = document.species.len(),
            history = document.history.len(),
            "Export collected"
        );
        Ok(document)
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
