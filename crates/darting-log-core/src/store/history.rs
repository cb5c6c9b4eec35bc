//! Global history of standalone calculator runs.

use super::{load_list, save_list, KeyValueStore, StoreResult, HISTORY_KEY};
use crate::models::HistoryEntry;

/// Append-mostly log of [`HistoryEntry`] values.
pub struct HistoryLog<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> HistoryLog<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All entries, oldest first.
    pub fn list(&self) -> StoreResult<Vec<HistoryEntry>> {
        load_list(self.store, HISTORY_KEY)
    }

    /// Append an entry.
    pub fn append(&self, entry: &HistoryEntry) -> StoreResult<usize> {
        let mut entries = self.list()?;
        entries.push(entry.clone());
        save_list(self.store, HISTORY_KEY, &entries)?;
        Ok(entries.len())
    }

    /// Remove every entry.
    pub fn clear(&self) -> StoreResult<()> {
        save_list::<HistoryEntry, _>(self.store, HISTORY_KEY, &[])?;
        tracing::info!("History cleared");
        Ok(())
    }

    /// Replace the whole history.
    pub fn replace_all(&self, entries: &[HistoryEntry]) -> StoreResult<()> {
        save_list(self.store, HISTORY_KEY, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoryDrug;
    use crate::store::MemoryStore;

    fn entry(species: &str) -> HistoryEntry {
        HistoryEntry {
            species_name: species.into(),
            weight_kg: 100.0,
            drugs: vec![HistoryDrug {
                drug_name: "Ketamine".into(),
                dose: 2.0,
            }],
            total_volume: 2.0,
            timestamp: "2024-03-01T10:00:00+00:00".into(),
        }
    }

    #[test]
    fn test_append_and_clear() {
        let store = MemoryStore::new();
        let log = HistoryLog::new(&store);

        assert_eq!(log.append(&entry("Lion")).unwrap(), 1);
        assert_eq!(log.append(&entry("Zebra")).unwrap(), 2);

        let entries = log.list().unwrap();
        assert_eq!(entries[0].species_name, "Lion");
        assert_eq!(entries[1].species_name, "Zebra");

        log.clear().unwrap();
        assert!(log.list().unwrap().is_empty());
    }
}
