//! Calculation snapshots produced by the dose calculator.
//!
//! Both types copy species and drug names instead of referencing catalog
//! identifiers, so they stay readable after the catalog entry changes.

use serde::{Deserialize, Serialize};

/// Frozen output of one dose calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Calculation {
    /// Species name at calculation time
    pub species_name: String,
    /// Body weight in kg
    pub weight_kg: f64,
    /// Valid drug rows in input order
    pub drugs: Vec<CalculatedDrug>,
    /// Sum of row volumes in mL (unrounded)
    pub total_volume: f64,
    /// Calculation timestamp
    pub timestamp: String,
}

/// One drug row of a calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculatedDrug {
    pub drug_name: String,
    /// Dose in mg/kg
    pub dose: f64,
    /// Injectable volume in mL (unrounded)
    pub volume: f64,
}

/// A standalone calculator run kept in the global history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub species_name: String,
    pub weight_kg: f64,
    pub drugs: Vec<HistoryDrug>,
    /// Total volume in mL
    pub total_volume: f64,
    pub timestamp: String,
}

/// Drug name and dose recorded in a history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryDrug {
    pub drug_name: String,
    pub dose: f64,
}

impl From<&Calculation> for HistoryEntry {
    fn from(calc: &Calculation) -> Self {
        Self {
            species_name: calc.species_name.clone(),
            weight_kg: calc.weight_kg,
            drugs: calc
                .drugs
                .iter()
                .map(|d| HistoryDrug {
                    drug_name: d.drug_name.clone(),
                    dose: d.dose,
                })
                .collect(),
            total_volume: calc.total_volume,
            timestamp: calc.timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_from_calculation() {
        let calc = Calculation {
            species_name: "Lion".into(),
            weight_kg: 180.0,
            drugs: vec![
                CalculatedDrug {
                    drug_name: "Medetomidine".into(),
                    dose: 0.05,
                    volume: 0.45,
                },
                CalculatedDrug {
                    drug_name: "Ketamine".into(),
                    dose: 2.0,
                    volume: 3.6,
                },
            ],
            total_volume: 4.05,
            timestamp: "2024-03-01T10:00:00+00:00".into(),
        };

        let entry = HistoryEntry::from(&calc);
        assert_eq!(entry.species_name, "Lion");
        assert_eq!(entry.weight_kg, 180.0);
        assert_eq!(entry.drugs.len(), 2);
        assert_eq!(entry.drugs[1].drug_name, "Ketamine");
        assert_eq!(entry.drugs[1].dose, 2.0);
        assert_eq!(entry.total_volume, 4.05);
        assert_eq!(entry.timestamp, calc.timestamp);
    }
}
