//! Golden and property tests for the dose calculator.

use darting_log_core::calculator::{
    calculate, parse_concentration, volume_ml, DoseRequest, DoseRow, MISSING_DRUG_OR_DOSE,
};
use darting_log_core::models::{Drug, Species};
use proptest::prelude::*;

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    weight: &'static str,
    rows: Vec<(Option<&'static str>, &'static str)>, // (concentration, dose)
    expected_lines: Vec<&'static str>,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "single-row-50kg",
            weight: "50",
            rows: vec![(Some("100mg/ml"), "5")],
            expected_lines: vec!["Drug 1: 2.50 ml", "Total volume: 2.50 ml"],
        },
        GoldenCase {
            id: "second-row-unselected",
            weight: "10",
            rows: vec![(Some("10"), "2"), (None, "2")],
            expected_lines: vec!["Drug 1: 2.00 ml", "Select drug and dose.", "Total volume: 2.00 ml"],
        },
        GoldenCase {
            id: "free-text-concentration",
            weight: "20",
            rows: vec![(Some("about 5mg strong"), "1")],
            expected_lines: vec!["Drug 1: 4.00 ml", "Total volume: 4.00 ml"],
        },
        GoldenCase {
            id: "no-digit-concentration",
            weight: "2",
            rows: vec![(Some("n/a"), "1.5")],
            expected_lines: vec!["Drug 1: 3.00 ml", "Total volume: 3.00 ml"],
        },
        GoldenCase {
            id: "weight-with-unit",
            weight: "250 kg",
            rows: vec![(Some("40mg/ml"), "0.2"), (Some("9.8mg/ml"), "0.01")],
            expected_lines: vec!["Drug 1: 1.25 ml", "Drug 2: 0.26 ml", "Total volume: 1.51 ml"],
        },
        GoldenCase {
            id: "unparseable-dose",
            weight: "100",
            rows: vec![(Some("100"), ""), (Some("100"), "abc")],
            expected_lines: vec!["Select drug and dose.", "Select drug and dose.", "Total volume: 0.00 ml"],
        },
    ]
}

fn build_rows(rows: &[(Option<&str>, &str)]) -> Vec<DoseRow> {
    rows.iter()
        .enumerate()
        .map(|(i, (concentration, dose))| {
            let drug = concentration
                .map(|c| Drug::new(format!("Drug {}", i + 1)).with_concentration(c));
            DoseRow::new(drug, *dose)
        })
        .collect()
}

#[test]
fn test_golden_cases() {
    let species = Species::new("Test species".into());

    for case in get_golden_cases() {
        let rows = build_rows(&case.rows);
        let outcome = calculate(&DoseRequest {
            species: Some(&species),
            weight: case.weight,
            rows: &rows,
        });
        assert_eq!(outcome.lines, case.expected_lines, "Case {}", case.id);
        assert!(outcome.calculation.is_some(), "Case {}", case.id);
    }
}

#[test]
fn test_weight_250kg_total_unrounded() {
    // 1.25 + 0.2551.. = 1.5051..; summing rounded rows would give 1.51 too,
    // so check the stored total directly.
    let species = Species::new("Roan".into());
    let rows = build_rows(&[(Some("40mg/ml"), "0.2"), (Some("9.8mg/ml"), "0.01")]);
    let calc = calculate(&DoseRequest {
        species: Some(&species),
        weight: "250",
        rows: &rows,
    })
    .calculation
    .unwrap();

    let expected = 250.0 * 0.2 / 40.0 + 250.0 * 0.01 / 9.8;
    assert!((calc.total_volume - expected).abs() < 1e-12);
}

#[test]
fn test_scenario_names_in_calculation() {
    let species = Species::new("Black wildebeest".into());
    let rows = vec![DoseRow::new(
        Some(Drug::new("Etorphine".into()).with_concentration("100mg/ml")),
        "5",
    )];
    let calc = calculate(&DoseRequest {
        species: Some(&species),
        weight: "50",
        rows: &rows,
    })
    .calculation
    .unwrap();

    assert_eq!(calc.species_name, "Black wildebeest");
    assert_eq!(calc.drugs[0].drug_name, "Etorphine");
    assert_eq!(calc.drugs[0].dose, 5.0);
    assert!((calc.total_volume - 2.5).abs() < 1e-9);
}

proptest! {
    #[test]
    fn prop_no_digits_parses_to_one(text in "[^0-9]*") {
        prop_assert_eq!(parse_concentration(&text), 1.0);
    }

    #[test]
    fn prop_leading_number_is_parsed(
        value in 0u32..100_000,
        suffix in "[a-dA-Df-zF-Z/ ]{0,12}",
    ) {
        let text = format!("{}{}", value, suffix);
        prop_assert_eq!(parse_concentration(&text), value as f64);
    }

    #[test]
    fn prop_volume_matches_formula(
        w in 0.1f64..5000.0,
        d in 0.001f64..50.0,
        c in 0.1f64..500.0,
    ) {
        let species = Species::new("Any".into());
        let rows = vec![DoseRow::new(
            Some(Drug::new("X".into()).with_concentration(c.to_string())),
            d.to_string(),
        )];
        let calc = calculate(&DoseRequest {
            species: Some(&species),
            weight: &w.to_string(),
            rows: &rows,
        })
        .calculation
        .unwrap();

        let expected = (w * d) / c;
        prop_assert!((calc.drugs[0].volume - expected).abs() < 1e-9 * expected.max(1.0));
        prop_assert!((volume_ml(w, d, c) - expected).abs() < 1e-9 * expected.max(1.0));
    }

    #[test]
    fn prop_valid_rows_contribute_in_order(valid in proptest::collection::vec(any::<bool>(), 0..12)) {
        let species = Species::new("Any".into());
        let rows: Vec<DoseRow> = valid
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                if *ok {
                    DoseRow::new(Some(Drug::new(format!("D{}", i)).with_concentration("10")), "1")
                } else {
                    DoseRow::new(None, "1")
                }
            })
            .collect();

        let outcome = calculate(&DoseRequest {
            species: Some(&species),
            weight: "10",
            rows: &rows,
        });

        let m = valid.iter().filter(|v| **v).count();
        prop_assert_eq!(outcome.lines.len(), valid.len() + 1);
        for (i, ok) in valid.iter().enumerate() {
            if *ok {
                prop_assert_eq!(&outcome.lines[i], &format!("D{}: 1.00 ml", i));
            } else {
                prop_assert_eq!(outcome.lines[i].as_str(), MISSING_DRUG_OR_DOSE);
            }
        }
        let calc = outcome.calculation.unwrap();
        prop_assert_eq!(calc.drugs.len(), m);
        prop_assert_eq!(
            outcome.lines.last().unwrap(),
            &format!("Total volume: {:.2} ml", m as f64)
        );
    }

    #[test]
    fn prop_display_has_two_decimals(w in 0.1f64..1000.0, d in 0.01f64..10.0) {
        let species = Species::new("Any".into());
        let rows = vec![DoseRow::new(
            Some(Drug::new("X".into()).with_concentration("7")),
            d.to_string(),
        )];
        let outcome = calculate(&DoseRequest {
            species: Some(&species),
            weight: &w.to_string(),
            rows: &rows,
        });
        for line in &outcome.lines {
            let number = line.trim_end_matches(" ml").rsplit(' ').next().unwrap();
            let decimals = number.split('.').nth(1).unwrap();
            prop_assert_eq!(decimals.len(), 2);
        }
    }
}
