use mta_recovery::aggregate::{TOTAL_COLUMN, add_total_ridership};
use mta_recovery::parser::parse_table;
use mta_recovery::recovery::compute_recovery;

fn modes(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_full_pipeline() {
    let bytes = include_bytes!("fixtures/sample_ridership.csv");

    let table = parse_table(bytes).expect("Failed to parse fixture");
    let table = add_total_ridership(&table).expect("Failed to aggregate");

    assert_eq!(table.len(), 8);

    // First row has every addend present.
    assert_eq!(table.records()[0].value(TOTAL_COLUMN), Some(3_465_000.0));
    // 01/10/2021 is missing the Buses addend, so its total is missing.
    assert_eq!(table.records()[3].value(TOTAL_COLUMN), None);

    let report = compute_recovery(
        &table,
        "Subways",
        &modes(&["Subways", "Buses", "LIRR", "Metro-North"]),
    );

    assert_eq!(report.rows.len(), 4);
    assert!(report.skipped.is_empty());

    assert_eq!(report.rows[0].transit_mode, "Subways");
    assert_eq!(report.rows[0].peak_ridership, "5,000,000");
    assert_eq!(report.rows[0].recovery_percentage, "74.00%");

    assert_eq!(report.rows[1].transit_mode, "Buses");
    assert_eq!(report.rows[1].recovery_percentage, "75.00%");

    assert_eq!(report.rows[2].recovery_percentage, "80.00%");
    assert_eq!(report.rows[3].recovery_percentage, "80.00%");

    // One trace per selected mode, full series length.
    assert_eq!(report.series.len(), 4);
    assert_eq!(report.series[0].points.len(), 8);

    assert!(report.summary.contains("Analysis of 4 transit modes"));
    assert!(report.summary.contains("Metric: Subways"));
}

#[test]
fn test_pipeline_with_unresolvable_mode() {
    let bytes = include_bytes!("fixtures/sample_ridership.csv");
    let table = add_total_ridership(&parse_table(bytes).unwrap()).unwrap();

    let report = compute_recovery(&table, "Subways", &modes(&["Subways", "Ferries"]));

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].mode, "Ferries");
    assert!(report.summary.contains("Skipped: Ferries"));
}
