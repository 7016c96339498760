//! CSV parser for the MTA daily ridership feed.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::error::DashboardError;
use crate::table::{RidershipRecord, RidershipTable};

/// Expected format of the `Date` column, e.g. `01/15/2023`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Name of the date column in the source feed.
pub const DATE_COLUMN: &str = "Date";

/// Per-mode category columns summed by the aggregator. The loader rejects a
/// feed that is missing any of them.
pub const CATEGORY_COLUMNS: [&str; 5] = [
    "Subways: Total Estimated Ridership",
    "Buses: Total Estimated Ridership",
    "LIRR: Total Estimated Ridership",
    "Metro-North: Total Estimated Ridership",
    "Staten Island Railway: Total Estimated Ridership",
];

/// Parses raw CSV bytes into a [`RidershipTable`].
///
/// Empty or non-numeric cells become missing values; a bad date is fatal.
///
/// # Errors
///
/// Returns [`DashboardError::DataFormat`] if the `Date` column is absent, a
/// date does not match [`DATE_FORMAT`], or a date appears twice, and
/// [`DashboardError::Schema`] if any of [`CATEGORY_COLUMNS`] is missing.
pub fn parse_table(bytes: &[u8]) -> Result<RidershipTable, DashboardError> {
    let mut rdr = csv::Reader::from_reader(bytes);

    let headers = rdr
        .headers()
        .map_err(|e| DashboardError::DataFormat(format!("unreadable header row: {e}")))?
        .clone();

    let date_idx = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or_else(|| DashboardError::DataFormat(format!("missing '{DATE_COLUMN}' column")))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    for required in CATEGORY_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(DashboardError::Schema(required.to_string()));
        }
    }

    let mut records = Vec::new();
    let mut seen_dates: HashMap<NaiveDate, usize> = HashMap::new();

    for (row_no, result) in rdr.records().enumerate() {
        let row =
            result.map_err(|e| DashboardError::DataFormat(format!("row {}: {e}", row_no + 1)))?;

        let raw_date = row.get(date_idx).unwrap_or("");
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|e| {
            DashboardError::DataFormat(format!(
                "row {}: unparseable date '{raw_date}': {e}",
                row_no + 1
            ))
        })?;

        if let Some(prior) = seen_dates.insert(date, row_no + 1) {
            return Err(DashboardError::DataFormat(format!(
                "duplicate date {date} at rows {prior} and {}",
                row_no + 1
            )));
        }

        let mut values = HashMap::with_capacity(columns.len());
        for (i, cell) in row.iter().enumerate() {
            if i == date_idx {
                continue;
            }
            if let Some(name) = headers.get(i) {
                values.insert(name.to_string(), parse_cell(cell));
            }
        }

        records.push(RidershipRecord { date, values });
    }

    debug!(
        rows = records.len(),
        columns = columns.len(),
        "Ridership table parsed"
    );

    Ok(RidershipTable::new(columns, records))
}

/// Numeric cell parse with missing-value semantics. The feed writes counts
/// both bare and comma-grouped. Non-finite values (`NaN`, `inf`) also count
/// as missing so they never reach the peak/last computation.
fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Subways: Total Estimated Ridership,Buses: Total Estimated Ridership,LIRR: Total Estimated Ridership,Metro-North: Total Estimated Ridership,Staten Island Railway: Total Estimated Ridership
01/15/2023,1000,500,100,200,10
01/16/2023,1100,550,110,210,11
";

    #[test]
    fn test_parse_valid_feed() {
        let table = parse_table(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns().len(), 5);
        assert_eq!(
            table.records()[0].value("Buses: Total Estimated Ridership"),
            Some(500.0)
        );
    }

    #[test]
    fn test_parse_missing_date_column() {
        let csv = "Day,Subways: Total Estimated Ridership\n01/15/2023,1000\n";
        let err = parse_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::DataFormat(_)));
    }

    #[test]
    fn test_parse_bad_date_value() {
        let csv = SAMPLE.replace("01/16/2023", "2023-01-16");
        let err = parse_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::DataFormat(_)));
    }

    #[test]
    fn test_parse_duplicate_date() {
        let csv = SAMPLE.replace("01/16/2023", "01/15/2023");
        let err = parse_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::DataFormat(_)));
    }

    #[test]
    fn test_parse_missing_category_column() {
        let csv = SAMPLE.replace("LIRR: Total Estimated Ridership", "LIRR: Riders");
        let err = parse_table(csv.as_bytes()).unwrap_err();
        match err {
            DashboardError::Schema(col) => {
                assert_eq!(col, "LIRR: Total Estimated Ridership");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_finite_cells_are_missing() {
        let csv = SAMPLE
            .replace("01/16/2023,1100", "01/16/2023,NaN")
            .replace(",550,", ",inf,");
        let table = parse_table(csv.as_bytes()).unwrap();
        let second = &table.records()[1];
        assert_eq!(second.value("Subways: Total Estimated Ridership"), None);
        assert_eq!(second.value("Buses: Total Estimated Ridership"), None);
    }

    #[test]
    fn test_parse_blank_and_grouped_cells() {
        let csv = SAMPLE
            .replace("01/16/2023,1100", "01/16/2023,\"1,100\"")
            .replace(",550,", ",,");
        let table = parse_table(csv.as_bytes()).unwrap();
        let second = &table.records()[1];
        assert_eq!(
            second.value("Subways: Total Estimated Ridership"),
            Some(1100.0)
        );
        assert_eq!(second.value("Buses: Total Estimated Ridership"), None);
    }
}
