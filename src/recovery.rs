//! Recovery-percentage computation over the loaded ridership table.
//!
//! For each selected transit mode this resolves the backing column, extracts
//! its full time series, and compares the most recent value against the
//! historical peak. Per-mode failures never abort the interaction; the mode
//! is skipped and named in the summary.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::error::DashboardError;
use crate::table::RidershipTable;

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One chart trace, in selection order.
#[derive(Debug, Clone, Serialize)]
pub struct ModeSeries {
    pub mode: String,
    pub points: Vec<SeriesPoint>,
}

/// One row of the comparative table, display-formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparativeRow {
    #[serde(rename = "Transit Mode")]
    pub transit_mode: String,
    #[serde(rename = "Peak Ridership")]
    pub peak_ridership: String,
    #[serde(rename = "Recovery Percentage")]
    pub recovery_percentage: String,
}

/// A mode that could not be rendered, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedMode {
    pub mode: String,
    pub reason: String,
}

/// Everything one interaction needs: chart traces, summary text, and the
/// comparative table. Recomputed fresh per request, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryReport {
    pub series: Vec<ModeSeries>,
    pub summary: String,
    pub rows: Vec<ComparativeRow>,
    pub skipped: Vec<SkippedMode>,
}

/// Naming convention binding a selector pair to a table column.
pub fn series_column(mode: &str, metric: &str) -> String {
    format!("{mode}_{metric}")
}

/// Computes recovery for every selected mode, preserving selection order.
///
/// Deterministic for identical inputs; "last" means the final record of the
/// loaded table, not wall-clock time.
pub fn compute_recovery(table: &RidershipTable, metric: &str, modes: &[String]) -> RecoveryReport {
    let mut series = Vec::new();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for mode in modes {
        let column = series_column(mode, metric);

        let points = match table.series(&column) {
            Ok(points) => points,
            Err(e) => {
                warn!(mode = %mode, column = %column, error = %e, "Mode skipped");
                skipped.push(SkippedMode {
                    mode: mode.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let Some((peak, last)) = peak_and_last(&points) else {
            let e = DashboardError::DataQuality(format!("column '{column}' has no numeric data"));
            warn!(mode = %mode, column = %column, error = %e, "Mode skipped");
            skipped.push(SkippedMode {
                mode: mode.clone(),
                reason: e.to_string(),
            });
            continue;
        };

        let recovery_pct = if peak > 0.0 { last / peak * 100.0 } else { 0.0 };

        rows.push(ComparativeRow {
            transit_mode: mode.replace('_', " "),
            peak_ridership: format_grouped(peak),
            recovery_percentage: format!("{recovery_pct:.2}%"),
        });

        series.push(ModeSeries {
            mode: mode.clone(),
            points: points
                .into_iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        });
    }

    let summary = summarize(metric, modes, &skipped);

    RecoveryReport {
        series,
        summary,
        rows,
        skipped,
    }
}

/// Historical maximum and chronologically final value of a series.
fn peak_and_last(points: &[(NaiveDate, f64)]) -> Option<(f64, f64)> {
    let last = points.last()?.1;
    let peak = points
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    Some((peak, last))
}

fn summarize(metric: &str, modes: &[String], skipped: &[SkippedMode]) -> String {
    if modes.is_empty() {
        return format!("No transit modes selected. Metric: {metric}");
    }

    let mut summary = format!(
        "Analysis of {} transit modes. Metric: {metric}",
        modes.len() - skipped.len()
    );

    if !skipped.is_empty() {
        let names: Vec<&str> = skipped.iter().map(|s| s.mode.as_str()).collect();
        summary.push_str(&format!(". Skipped: {}", names.join(", ")));
    }

    summary
}

/// Formats a count as a comma-grouped integer, e.g. `1234567.0` → `1,234,567`.
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
