//! Derives the combined "Total Estimated Ridership" column.

use tracing::debug;

use crate::error::DashboardError;
use crate::parser::CATEGORY_COLUMNS;
use crate::table::RidershipTable;

/// Name of the derived column added by [`add_total_ridership`].
pub const TOTAL_COLUMN: &str = "Total Estimated Ridership";

/// Extends the table with a row-wise sum of the five category columns.
///
/// A row with any missing addend gets a missing total; the gap propagates
/// rather than failing the load.
///
/// # Errors
///
/// Returns [`DashboardError::Schema`] if a required category column is
/// absent (the loader normally guarantees presence).
pub fn add_total_ridership(table: &RidershipTable) -> Result<RidershipTable, DashboardError> {
    for required in CATEGORY_COLUMNS {
        if !table.has_column(required) {
            return Err(DashboardError::Schema(required.to_string()));
        }
    }

    let mut extended = table.clone();
    let mut complete_rows = 0usize;

    for record in &mut extended.records {
        let total = CATEGORY_COLUMNS
            .iter()
            .map(|c| record.value(c))
            .try_fold(0.0, |acc, v| v.map(|v| acc + v));

        if total.is_some() {
            complete_rows += 1;
        }
        record.values.insert(TOTAL_COLUMN.to_string(), total);
    }

    extended.columns.push(TOTAL_COLUMN.to_string());

    debug!(
        rows = extended.len(),
        complete_rows,
        "Total ridership column derived"
    );

    Ok(extended)
}
