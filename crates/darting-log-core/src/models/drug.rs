//! Drug catalog models.

use serde::{Deserialize, Serialize};

/// A drug in the field catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drug {
    /// Unique identifier, stable across edits
    pub id: String,
    /// Drug name as shown in pick lists
    pub name: String,
    /// Free-text concentration (e.g., "100mg/ml")
    #[serde(default)]
    pub concentration: String,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Species-specific doses in mg/kg, in entry order
    #[serde(default)]
    pub species_doses: Vec<SpeciesDose>,
}

/// Species-specific dose override for a drug.
///
/// `species_id` is not checked against the species catalog and may point at a
/// deleted species.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesDose {
    pub species_id: String,
    pub dose_mg_per_kg: f64,
}

impl Default for Drug {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Drug {
    /// Create a new drug with a fresh identifier.
    pub fn new(name: String) -> Self {
        Self {
            id: super::new_id(),
            name,
            concentration: String::new(),
            notes: String::new(),
            species_doses: Vec::new(),
        }
    }

    /// Builder-style concentration setter.
    pub fn with_concentration(mut self, concentration: impl Into<String>) -> Self {
        self.concentration = concentration.into();
        self
    }

    /// Look up the dose override for a species.
    pub fn dose_for_species(&self, species_id: &str) -> Option<f64> {
        self.species_doses
            .iter()
            .find(|sd| sd.species_id == species_id)
            .map(|sd| sd.dose_mg_per_kg)
    }

    /// Set the dose for a species, replacing an existing entry in place.
    pub fn set_species_dose(&mut self, species_id: &str, dose_mg_per_kg: f64) {
        match self
            .species_doses
            .iter_mut()
            .find(|sd| sd.species_id == species_id)
        {
            Some(existing) => existing.dose_mg_per_kg = dose_mg_per_kg,
            None => self.species_doses.push(SpeciesDose {
                species_id: species_id.to_string(),
                dose_mg_per_kg,
            }),
        }
    }

    /// Remove the dose entry for a species. Returns true if one was removed.
    pub fn remove_species_dose(&mut self, species_id: &str) -> bool {
        let before = self.species_doses.len();
        self.species_doses.retain(|sd| sd.species_id != species_id);
        self.species_doses.len() != before
    }
}
