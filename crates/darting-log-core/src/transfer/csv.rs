//! CSV rendering of calculator history.

use crate::calculator::format_volume;
use crate::models::HistoryEntry;

/// Render history as CSV, one line per drug.
///
/// Entries without drugs still get a line so the run is visible.
pub fn history_to_csv(entries: &[HistoryEntry]) -> String {
    let mut csv = String::new();

    // Header
    csv.push_str("timestamp,species,weight_kg,drug,dose_mg_per_kg,total_volume_ml\n");

    for entry in entries {
        let total = format_volume(entry.total_volume);
        if entry.drugs.is_empty() {
            csv.push_str(&format!(
                "{},{},{},,,{}\n",
                escape_csv(&entry.timestamp),
                escape_csv(&entry.species_name),
                entry.weight_kg,
                total,
            ));
        }
        for drug in &entry.drugs {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                escape_csv(&entry.timestamp),
                escape_csv(&entry.species_name),
                entry.weight_kg,
                escape_csv(&drug.drug_name),
                drug.dose,
                total,
            ));
        }
    }

    csv
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoryDrug;

    fn make_entry(drugs: Vec<HistoryDrug>) -> HistoryEntry {
        HistoryEntry {
            species_name: "Cape buffalo".into(),
            weight_kg: 550.0,
            drugs,
            total_volume: 3.456,
            timestamp: "2024-04-10T06:30:00+00:00".into(),
        }
    }

    #[test]
    fn test_history_csv() {
        let entry = make_entry(vec![
            HistoryDrug {
                drug_name: "Etorphine".into(),
                dose: 0.01,
            },
            HistoryDrug {
                drug_name: "Azaperone, 40mg".into(),
                dose: 0.1,
            },
        ]);

        let csv = history_to_csv(&[entry]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3); // Header + 2 drugs
        assert!(lines[0].starts_with("timestamp,"));
        assert_eq!(
            lines[1],
            "2024-04-10T06:30:00+00:00,Cape buffalo,550,Etorphine,0.01,3.46"
        );
        assert!(lines[2].contains("\"Azaperone, 40mg\""));
    }

    #[test]
    fn test_entry_without_drugs() {
        let csv = history_to_csv(&[make_entry(vec![])]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(",,,3.46"));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
