//! Dose calculator: weight × dose / concentration, per drug row.

use crate::models::{CalculatedDrug, Calculation, Drug, Species};

use super::{format_volume, parse_concentration, parse_number};

/// Line shown in place of results when species or weight is missing.
pub const MISSING_SPECIES_OR_WEIGHT: &str = "Please select a species and enter a valid weight.";

/// Line shown for a row without a drug or a parseable dose.
pub const MISSING_DRUG_OR_DOSE: &str = "Select drug and dose.";

/// One drug row of the calculator form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoseRow {
    /// Selected drug, if any
    pub drug: Option<Drug>,
    /// Dose in mg/kg as typed
    pub dose: String,
}

impl DoseRow {
    pub fn new(drug: Option<Drug>, dose: impl Into<String>) -> Self {
        Self {
            drug,
            dose: dose.into(),
        }
    }

    /// Row for a freshly selected drug, pre-filled with the species dose.
    pub fn for_drug(drug: Drug, species: Option<&Species>) -> Self {
        let dose = species
            .and_then(|s| drug.dose_for_species(&s.id))
            .map(|d| d.to_string())
            .unwrap_or_default();
        Self {
            drug: Some(drug),
            dose,
        }
    }
}

/// Inputs for one calculator run.
#[derive(Debug, Clone, Copy)]
pub struct DoseRequest<'a> {
    pub species: Option<&'a Species>,
    /// Weight in kg as typed
    pub weight: &'a str,
    pub rows: &'a [DoseRow],
}

/// Result of a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowResult {
    /// Row computed a volume
    Volume(CalculatedDrug),
    /// Drug unselected or dose unparseable
    Incomplete,
}

impl RowResult {
    /// Display line for this row.
    pub fn line(&self) -> String {
        match self {
            RowResult::Volume(d) => format!("{}: {} ml", d.drug_name, format_volume(d.volume)),
            RowResult::Incomplete => MISSING_DRUG_OR_DOSE.to_string(),
        }
    }
}

/// Outcome of a calculator run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    /// Row lines in input order followed by the total line, or a single
    /// validation message
    pub lines: Vec<String>,
    /// Structured record, absent when the run was aborted
    pub calculation: Option<Calculation>,
}

impl CalculationOutcome {
    fn aborted() -> Self {
        Self {
            lines: vec![MISSING_SPECIES_OR_WEIGHT.to_string()],
            calculation: None,
        }
    }

    /// Whether the run produced a calculation.
    pub fn is_complete(&self) -> bool {
        self.calculation.is_some()
    }
}

/// Injectable volume in mL for a weight (kg), dose (mg/kg) and
/// concentration (mg/mL).
pub fn volume_ml(weight_kg: f64, dose_mg_per_kg: f64, concentration: f64) -> f64 {
    (weight_kg * dose_mg_per_kg) / concentration
}

/// Evaluate a single row against a body weight.
pub fn calculate_row(weight_kg: f64, row: &DoseRow) -> RowResult {
    let (Some(drug), Some(dose)) = (row.drug.as_ref(), parse_number(&row.dose)) else {
        return RowResult::Incomplete;
    };

    let concentration = parse_concentration(&drug.concentration);
    RowResult::Volume(CalculatedDrug {
        drug_name: drug.name.clone(),
        dose,
        volume: volume_ml(weight_kg, dose, concentration),
    })
}

/// Run the calculator.
///
/// The total is accumulated from unrounded row volumes; rounding happens only
/// in the display lines.
pub fn calculate(request: &DoseRequest<'_>) -> CalculationOutcome {
    let (Some(species), Some(weight_kg)) = (request.species, parse_number(request.weight)) else {
        return CalculationOutcome::aborted();
    };

    let mut lines = Vec::with_capacity(request.rows.len() + 1);
    let mut drugs = Vec::new();
    let mut total_volume = 0.0;

    for row in request.rows {
        let result = calculate_row(weight_kg, row);
        lines.push(result.line());
        if let RowResult::Volume(drug) = result {
            total_volume += drug.volume;
            drugs.push(drug);
        }
    }

    lines.push(format!("Total volume: {} ml", format_volume(total_volume)));

    tracing::debug!(
        species = %species.name,
        weight_kg,
        rows = request.rows.len(),
        valid_rows = drugs.len(),
        total_volume,
        "Dose calculation complete"
    );

    CalculationOutcome {
        lines,
        calculation: Some(Calculation {
            species_name: species.name.clone(),
            weight_kg,
            drugs,
            total_volume,
            timestamp: crate::models::now(),
        }),
    }
}
