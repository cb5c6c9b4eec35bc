//! Darting-Log Core Library
//!
//! Local-first record keeping for wildlife immobilization: drug and species
//! catalogs, case monitoring logs and dose-to-volume calculations.
//!
//! # Architecture
//!
//! ```text
//!  Drug catalog ─┐
//!                ├──► Concentration Parser ──► Dose Calculator
//!  Species ──────┘                                   │
//!                                   ┌────────────────┴────────────────┐
//!                                   ▼                                 ▼
//!                         Standalone calculator               Case session
//!                         (appends History)          (appends to Monitoring.calculations)
//!                                   │                                 │
//!                                   ▼                                 ▼
//!                     ┌──────────────────── Key-value store ───────────────────┐
//!                     │  drugs   species   cases   history   (JSON arrays)     │
//!                     └────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`calculator`]: concentration parsing and dose-to-volume calculation
//! - [`models`]: Domain types (Drug, Species, Case, Calculation, etc.)
//! - [`store`]: Key-value store trait and typed collections
//! - [`db`]: SQLite-backed key-value store
//! - [`session`]: Edit sessions with save/cancel
//! - [`transfer`]: Export/import documents and history CSV
//! - [`config`], [`logging`]: Runtime configuration and tracing setup

pub mod calculator;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod transfer;

// Re-export commonly used types
pub use calculator::{
    calculate, parse_concentration, CalculationOutcome, DoseRequest, DoseRow, StandaloneCalculator,
};
pub use db::Database;
pub use models::{
    CalculatedDrug, Calculation, Case, Drug, HistoryDrug, HistoryEntry, Interval, Monitoring,
    MonitoringEvent, Species, SpeciesDose,
};
pub use session::{CaseSession, DrugSession, EditSession, SpeciesSession};
pub use store::{KeyValueStore, MemoryStore, Record, RecordStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DartingLogError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for DartingLogError {
    fn from(e: db::DbError) -> Self {
        DartingLogError::DatabaseError(e.to_string())
    }
}

impl From<store::StoreError> for DartingLogError {
    fn from(e: store::StoreError) -> Self {
        DartingLogError::DatabaseError(e.to_string())
    }
}

impl From<transfer::TransferError> for DartingLogError {
    fn from(e: transfer::TransferError) -> Self {
        match e {
            transfer::TransferError::Store(e) => e.into(),
            transfer::TransferError::InvalidDocument(e) => {
                DartingLogError::ImportError(e.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for DartingLogError {
    fn from(e: serde_json::Error) -> Self {
        DartingLogError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for DartingLogError {
    fn from(e: config::ConfigError) -> Self {
        DartingLogError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DartingLogError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DartingLogError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<DartingLogCore>, DartingLogError> {
    let db = Database::open(&path)?;
    Ok(DartingLogCore::wrap(db))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<DartingLogCore>, DartingLogError> {
    let db = Database::open_in_memory()?;
    Ok(DartingLogCore::wrap(db))
}

/// Load a JSON config file, install logging, and open its database.
///
/// An empty path uses the default configuration.
#[uniffi::export]
pub fn open_with_config(config_path: String) -> Result<Arc<DartingLogCore>, DartingLogError> {
    let config = if config_path.is_empty() {
        config::Config::default()
    } else {
        config::Config::from_json_file(&config_path)?
    };
    logging::init_logging(&config.log_filter);
    let db = Database::open(&config.database_path)?;
    Ok(DartingLogCore::wrap(db))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DartingLogCore {
    db: Arc<Mutex<Database>>,
}

impl DartingLogCore {
    fn wrap(db: Database) -> Arc<Self> {
        Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }
}

/// Resolve FFI rows and species against the catalogs.
///
/// Unknown identifiers resolve to "not selected", which the calculator reports
/// inline.
fn resolve_request(
    db: &Database,
    species_id: Option<&str>,
    rows: &[FfiDoseRow],
) -> Result<(Option<Species>, Vec<DoseRow>), DartingLogError> {
    let species = match species_id {
        Some(id) => store::species(db).get(id)?,
        None => None,
    };
    let catalog = store::drugs(db).list()?;
    let rows = rows
        .iter()
        .map(|row| {
            let drug = row
                .drug_id
                .as_deref()
                .and_then(|id| catalog.iter().find(|d| d.id == id).cloned());
            DoseRow::new(drug, row.dose.clone())
        })
        .collect();
    Ok((species, rows))
}

#[uniffi::export]
impl DartingLogCore {
    // =========================================================================
    // Drug Catalog
    // =========================================================================

    /// List drugs in catalog order.
    pub fn list_drugs(&self) -> Result<Vec<FfiDrug>, DartingLogError> {
        let db = self.db.lock()?;
        let drugs = store::drugs(&*db).list()?;
        Ok(drugs.into_iter().map(|d| d.into()).collect())
    }

    /// Add or update a drug. An empty id creates a new drug.
    pub fn save_drug(&self, drug: FfiDrug) -> Result<FfiDrug, DartingLogError> {
        let db = self.db.lock()?;
        let drug: Drug = drug.into();
        store::drugs(&*db).upsert(&drug)?;
        Ok(drug.into())
    }

    /// Delete a drug by id.
    pub fn delete_drug(&self, id: String) -> Result<bool, DartingLogError> {
        let db = self.db.lock()?;
        Ok(store::drugs(&*db).delete(&id)?)
    }

    /// Dose override for a drug and species, if any.
    pub fn species_dose(
        &self,
        drug_id: String,
        species_id: String,
    ) -> Result<Option<f64>, DartingLogError> {
        let db = self.db.lock()?;
        let drug = store::drugs(&*db)
            .get(&drug_id)?
            .ok_or_else(|| DartingLogError::NotFound(drug_id.clone()))?;
        Ok(drug.dose_for_species(&species_id))
    }

    // =========================================================================
    // Species Catalog
    // =========================================================================

    /// List species in catalog order.
    pub fn list_species(&self) -> Result<Vec<FfiSpecies>, DartingLogError> {
        let db = self.db.lock()?;
        let species = store::species(&*db).list()?;
        Ok(species.into_iter().map(|s| s.into()).collect())
    }

    /// Add or update a species. An empty id creates a new species.
    pub fn save_species(&self, species: FfiSpecies) -> Result<FfiSpecies, DartingLogError> {
        let db = self.db.lock()?;
        let species: Species = species.into();
        store::species(&*db).upsert(&species)?;
        Ok(species.into())
    }

    /// Delete a species by id. Drug dose entries pointing at it are kept.
    pub fn delete_species(&self, id: String) -> Result<bool, DartingLogError> {
        let db = self.db.lock()?;
        Ok(store::species(&*db).delete(&id)?)
    }

    // =========================================================================
    // Cases
    // =========================================================================

    /// List cases, newest date first.
    pub fn list_cases(&self) -> Result<Vec<FfiCaseSummary>, DartingLogError> {
        let db = self.db.lock()?;
        let cases = store::cases(&*db).list_by_date()?;
        Ok(cases.iter().map(|c| c.into()).collect())
    }

    /// Full case record as JSON (for report rendering).
    pub fn get_case_json(&self, id: String) -> Result<Option<String>, DartingLogError> {
        let db = self.db.lock()?;
        let case = store::cases(&*db).get(&id)?;
        Ok(case.map(|c| serde_json::to_string(&c)).transpose()?)
    }

    /// Delete a case by id.
    pub fn delete_case(&self, id: String) -> Result<bool, DartingLogError> {
        let db = self.db.lock()?;
        Ok(store::cases(&*db).delete(&id)?)
    }

    /// Start a form for a new case.
    pub fn new_case_editor(&self) -> Arc<CaseEditor> {
        Arc::new(CaseEditor {
            db: Arc::clone(&self.db),
            session: Mutex::new(CaseSession::new()),
        })
    }

    /// Start a form editing a stored case.
    pub fn edit_case(&self, id: String) -> Result<Arc<CaseEditor>, DartingLogError> {
        let case = {
            let db = self.db.lock()?;
            store::cases(&*db)
                .get(&id)?
                .ok_or_else(|| DartingLogError::NotFound(id.clone()))?
        };
        let mut session = CaseSession::new();
        session.begin_edit(case);
        Ok(Arc::new(CaseEditor {
            db: Arc::clone(&self.db),
            session: Mutex::new(session),
        }))
    }

    // =========================================================================
    // Standalone Calculator & History
    // =========================================================================

    /// Run the standalone calculator. Completed runs are added to history.
    pub fn calculate(
        &self,
        species_id: Option<String>,
        weight: String,
        rows: Vec<FfiDoseRow>,
    ) -> Result<FfiCalculationOutcome, DartingLogError> {
        let db = self.db.lock()?;
        let (species, rows) = resolve_request(&db, species_id.as_deref(), &rows)?;
        let outcome = StandaloneCalculator::new(&*db).run(&DoseRequest {
            species: species.as_ref(),
            weight: &weight,
            rows: &rows,
        })?;
        Ok(outcome.into())
    }

    /// Number of history entries.
    pub fn history_count(&self) -> Result<u32, DartingLogError> {
        let db = self.db.lock()?;
        Ok(store::HistoryLog::new(&*db).list()?.len() as u32)
    }

    /// History as CSV.
    pub fn export_history_csv(&self) -> Result<String, DartingLogError> {
        let db = self.db.lock()?;
        let entries = store::HistoryLog::new(&*db).list()?;
        Ok(transfer::history_to_csv(&entries))
    }

    /// Remove all history entries.
    pub fn clear_history(&self) -> Result<(), DartingLogError> {
        let db = self.db.lock()?;
        Ok(store::HistoryLog::new(&*db).clear()?)
    }

    // =========================================================================
    // Export / Import
    // =========================================================================

    /// Export drugs, species and history as JSON.
    pub fn export_json(&self) -> Result<String, DartingLogError> {
        let db = self.db.lock()?;
        let document = transfer::ExportDocument::collect(&*db)?;
        Ok(document.to_json()?)
    }

    /// Import a JSON document, overwriting each collection it contains.
    pub fn import_json(&self, json: String) -> Result<FfiImportSummary, DartingLogError> {
        let db = self.db.lock()?;
        let summary = transfer::import_json(&*db, &json)?;
        Ok(summary.into())
    }
}

// =========================================================================
// Case Editor Object
// =========================================================================

/// Live case form bound to the database it saves into.
#[derive(uniffi::Object)]
pub struct CaseEditor {
    db: Arc<Mutex<Database>>,
    session: Mutex<CaseSession>,
}

#[uniffi::export]
impl CaseEditor {
    /// Set identity fields of the working case.
    pub fn set_details(
        &self,
        case_number: Option<String>,
        name: String,
        date: String,
    ) -> Result<(), DartingLogError> {
        let mut session = self.session.lock()?;
        let case = session.case_mut();
        case.case_number = case_number;
        case.name = name;
        case.date = date;
        Ok(())
    }

    /// Stamp a monitoring event with the current time.
    pub fn mark_event(&self, event: FfiMonitoringEvent) -> Result<(), DartingLogError> {
        self.session.lock()?.mark_event(event.into());
        Ok(())
    }

    /// Clear a monitoring event.
    pub fn clear_event(&self, event: FfiMonitoringEvent) -> Result<(), DartingLogError> {
        self.session.lock()?.clear_event(event.into());
        Ok(())
    }

    /// Record a vital-sign observation.
    pub fn add_interval(
        &self,
        respiration: String,
        temperature: String,
    ) -> Result<(), DartingLogError> {
        self.session.lock()?.add_interval(respiration, temperature);
        Ok(())
    }

    /// Remove an observation by position. Returns false if out of range.
    pub fn remove_interval(&self, index: u32) -> Result<bool, DartingLogError> {
        Ok(self.session.lock()?.remove_interval(index as usize).is_some())
    }

    /// Run the in-case calculator. Completed runs are appended to the case.
    pub fn calculate(
        &self,
        species_id: Option<String>,
        weight: String,
        rows: Vec<FfiDoseRow>,
    ) -> Result<FfiCalculationOutcome, DartingLogError> {
        let (species, rows) = {
            let db = self.db.lock()?;
            resolve_request(&db, species_id.as_deref(), &rows)?
        };
        let outcome = self.session.lock()?.run_calculation(&DoseRequest {
            species: species.as_ref(),
            weight: &weight,
            rows: &rows,
        });
        Ok(outcome.into())
    }

    /// Working case as JSON.
    pub fn case_json(&self) -> Result<String, DartingLogError> {
        let session = self.session.lock()?;
        Ok(serde_json::to_string(session.case())?)
    }

    /// Whether a stored case is being edited.
    pub fn is_editing(&self) -> Result<bool, DartingLogError> {
        Ok(self.session.lock()?.is_editing())
    }

    /// Persist the case and reset the form.
    pub fn save(&self) -> Result<FfiCaseSummary, DartingLogError> {
        let mut session = self.session.lock()?;
        let db = self.db.lock()?;
        let saved = session.save(&store::cases(&*db))?;
        Ok((&saved).into())
    }

    /// Discard the working case.
    pub fn cancel(&self) -> Result<(), DartingLogError> {
        self.session.lock()?.cancel();
        Ok(())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe drug.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDrug {
    pub id: String,
    pub name: String,
    pub concentration: String,
    pub notes: String,
    pub species_doses: Vec<FfiSpeciesDose>,
}

/// FFI-safe species dose.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSpeciesDose {
    pub species_id: String,
    pub dose_mg_per_kg: f64,
}

impl From<Drug> for FfiDrug {
    fn from(drug: Drug) -> Self {
        Self {
            id: drug.id,
            name: drug.name,
            concentration: drug.concentration,
            notes: drug.notes,
            species_doses: drug
                .species_doses
                .into_iter()
                .map(|sd| FfiSpeciesDose {
                    species_id: sd.species_id,
                    dose_mg_per_kg: sd.dose_mg_per_kg,
                })
                .collect(),
        }
    }
}

impl From<FfiDrug> for Drug {
    fn from(drug: FfiDrug) -> Self {
        let mut converted = Drug::new(drug.name);
        if !drug.id.is_empty() {
            converted.id = drug.id;
        }
        converted.concentration = drug.concentration;
        converted.notes = drug.notes;
        converted.species_doses = drug
            .species_doses
            .into_iter()
            .map(|sd| SpeciesDose {
                species_id: sd.species_id,
                dose_mg_per_kg: sd.dose_mg_per_kg,
            })
            .collect();
        converted
    }
}

/// FFI-safe species.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSpecies {
    pub id: String,
    pub name: String,
    pub notes: String,
}

impl From<Species> for FfiSpecies {
    fn from(species: Species) -> Self {
        Self {
            id: species.id,
            name: species.name,
            notes: species.notes,
        }
    }
}

impl From<FfiSpecies> for Species {
    fn from(species: FfiSpecies) -> Self {
        let mut converted = Species::new(species.name);
        if !species.id.is_empty() {
            converted.id = species.id;
        }
        converted.notes = species.notes;
        converted
    }
}

/// FFI-safe calculator row. `None` means no drug selected.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoseRow {
    pub drug_id: Option<String>,
    pub dose: String,
}

/// FFI-safe calculator outcome.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCalculationOutcome {
    /// Display lines (row results then total, or one validation message)
    pub lines: Vec<String>,
    /// Unrounded total, absent when the run was aborted
    pub total_volume: Option<f64>,
}

impl From<CalculationOutcome> for FfiCalculationOutcome {
    fn from(outcome: CalculationOutcome) -> Self {
        Self {
            total_volume: outcome.calculation.as_ref().map(|c| c.total_volume),
            lines: outcome.lines,
        }
    }
}

/// FFI-safe case list entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCaseSummary {
    pub id: String,
    pub case_number: Option<String>,
    pub name: String,
    pub date: String,
    pub calculation_count: u32,
    pub interval_count: u32,
}

impl From<&Case> for FfiCaseSummary {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.clone(),
            case_number: case.case_number.clone(),
            name: case.name.clone(),
            date: case.date.clone(),
            calculation_count: case.monitoring.calculations().len() as u32,
            interval_count: case.monitoring.intervals.len() as u32,
        }
    }
}

/// FFI-safe monitoring event.
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiMonitoringEvent {
    DrugAdministration,
    Induction,
    HeadDown,
    Approach,
    Revival,
    HeadUp,
    Sternal,
    Standing,
}

impl From<FfiMonitoringEvent> for MonitoringEvent {
    fn from(event: FfiMonitoringEvent) -> Self {
        match event {
            FfiMonitoringEvent::DrugAdministration => MonitoringEvent::DrugAdministration,
            FfiMonitoringEvent::Induction => MonitoringEvent::Induction,
            FfiMonitoringEvent::HeadDown => MonitoringEvent::HeadDown,
            FfiMonitoringEvent::Approach => MonitoringEvent::Approach,
            FfiMonitoringEvent::Revival => MonitoringEvent::Revival,
            FfiMonitoringEvent::HeadUp => MonitoringEvent::HeadUp,
            FfiMonitoringEvent::Sternal => MonitoringEvent::Sternal,
            FfiMonitoringEvent::Standing => MonitoringEvent::Standing,
        }
    }
}

/// FFI-safe import summary. `None` means the collection was not in the file.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiImportSummary {
    pub drugs: Option<u32>,
    pub species: Option<u32>,
    pub history: Option<u32>,
}

impl From<transfer::ImportSummary> for FfiImportSummary {
    fn from(summary: transfer::ImportSummary) -> Self {
        Self {
            drugs: summary.drugs.map(|n| n as u32),
            species: summary.species.map(|n| n as u32),
            history: summary.history.map(|n| n as u32),
        }
    }
}
