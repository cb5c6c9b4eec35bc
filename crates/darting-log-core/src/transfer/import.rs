//! Import of catalogs and history.

use serde::Deserialize;

use crate::models::{Drug, HistoryEntry, Species};
use crate::store::{drugs, species, HistoryLog, KeyValueStore};

use super::TransferResult;

/// Import document. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ImportDocument {
    pub drugs: Option<Vec<Drug>>,
    pub species: Option<Vec<Species>>,
    pub history: Option<Vec<HistoryEntry>>,
}

/// Counts of records written per collection; `None` means left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub drugs: Option<usize>,
    pub species: Option<usize>,
    pub history: Option<usize>,
}

impl ImportDocument {
    /// Parse an import document.
    pub fn from_json(json: &str) -> TransferResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overwrite each collection present in the document.
    pub fn apply<S: KeyValueStore + ?Sized>(&self, store: &S) -> TransferResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        if let Some(items) = &self.drugs {
            drugs(store).replace_all(items)?;
            summary.drugs = Some(items.len());
        }
        if let Some(items) = &self.species {
            species(store).replace_all(items)?;
            summary.species = Some(items.len());
        }
        if let Some(entries) = &self.history {
            HistoryLog::new(store).replace_all(entries)?;
            summary.history = Some(entries.len());
        }

        tracing::info!(
            drugs = ?summary.drugs,
            species = ?summary.species,
            history = ?summary.history,
            "Import applied"
        );
        Ok(summary)
    }
}

/// Parse and apply an import document in one step.
///
/// Nothing is written when the document fails to parse.
pub fn import_json<S: KeyValueStore + ?Sized>(store: &S, json: &str) -> TransferResult<ImportSummary> {
    match ImportDocument::from_json(json) {
        Ok(document) => document.apply(store),
        Err(e) => {
            tracing::warn!(error = %e, "Import rejected");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{ExportDocument, TransferError};
    use crate::store::MemoryStore;

    #[test]
    fn test_present_keys_overwrite() {
        let store = MemoryStore::new();
        drugs(&store).upsert(&Drug::new("Old drug".into())).unwrap();
        species(&store).upsert(&Species::new("Kept species".into())).unwrap();

        let json = r#"{
            "drugs": [
                {"id": "d1", "name": "Etorphine", "concentration": "9.8mg/ml", "notes": "", "species_doses": []}
            ]
        }"#;
        let summary = import_json(&store, json).unwrap();

        assert_eq!(summary.drugs, Some(1));
        assert_eq!(summary.species, None);
        assert_eq!(summary.history, None);

        let drug_list = drugs(&store).list().unwrap();
        assert_eq!(drug_list.len(), 1);
        assert_eq!(drug_list[0].id, "d1");
        assert_eq!(species(&store).list().unwrap()[0].name, "Kept species");
    }

    #[test]
    fn test_empty_array_clears_collection() {
        let store = MemoryStore::new();
        species(&store).upsert(&Species::new("Lion".into())).unwrap();

        import_json(&store, r#"{"species": []}"#).unwrap();
        assert!(species(&store).list().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_writes_nothing() {
        let store = MemoryStore::new();
        species(&store).upsert(&Species::new("Lion".into())).unwrap();

        let result = import_json(&store, r#"{"species": "not a list"}"#);
        assert!(matches!(result, Err(TransferError::InvalidDocument(_))));
        assert_eq!(species(&store).list().unwrap().len(), 1);

        assert!(import_json(&store, "not json").is_err());
    }

    #[test]
    fn test_export_then_import_into_fresh_store() {
        let source = MemoryStore::new();
        let mut drug = Drug::new("Azaperone".into()).with_concentration("40mg/ml");
        drug.set_species_dose("sp-1", 0.2);
        drugs(&source).upsert(&drug).unwrap();
        species(&source).upsert(&Species::new("Nyala".into())).unwrap();

        let json = ExportDocument::collect(&source).unwrap().to_json().unwrap();

        let target = MemoryStore::new();
        let summary = import_json(&target, &json).unwrap();
        assert_eq!(summary.drugs, Some(1));
        assert_eq!(summary.species, Some(1));
        assert_eq!(summary.history, Some(0));
        assert_eq!(drugs(&target).list().unwrap(), vec![drug]);
    }
}
