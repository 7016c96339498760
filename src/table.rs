//! In-memory representation of the loaded ridership dataset.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::DashboardError;

/// One row of the source feed: a calendar date plus every named ridership
/// column for that date. Cells that were empty or non-numeric in the source
/// are `None`.
#[derive(Debug, Clone)]
pub struct RidershipRecord {
    pub date: NaiveDate,
    pub values: HashMap<String, Option<f64>>,
}

impl RidershipRecord {
    /// Value of a named column for this record, flattened over both
    /// "column absent" and "cell empty".
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied().flatten()
    }
}

/// The full dataset: records in feed order, plus the header column list.
///
/// Built once by the loader, extended once by the aggregator, then treated as
/// read-only for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct RidershipTable {
    pub(crate) columns: Vec<String>,
    pub(crate) records: Vec<RidershipRecord>,
}

impl RidershipTable {
    pub fn new(columns: Vec<String>, records: Vec<RidershipRecord>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[RidershipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Ordered `(date, value)` pairs for a named column.
    ///
    /// Missing cells are skipped, which renders as a gap in the chart.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownSeries`] if the column is not in the
    /// header.
    pub fn series(&self, column: &str) -> Result<Vec<(NaiveDate, f64)>, DashboardError> {
        if !self.has_column(column) {
            return Err(DashboardError::UnknownSeries(column.to_string()));
        }

        Ok(self
            .records
            .iter()
            .filter_map(|r| r.value(column).map(|v| (r.date, v)))
            .collect())
    }
}
