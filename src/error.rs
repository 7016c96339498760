//! Error taxonomy for the dashboard core.
//!
//! Loader and aggregator errors are fatal at startup; recovery errors are
//! scoped to a single mode and surfaced in the summary instead of aborting
//! the interaction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The date column is missing, a date failed to parse, or a date appears
    /// more than once.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// A column required by the aggregator is absent from the header.
    #[error("schema error: missing required column '{0}'")]
    Schema(String),

    /// The requested mode/metric combination has no backing column.
    #[error("unknown series: no column named '{0}'")]
    UnknownSeries(String),

    /// A resolvable column holds no usable numeric data.
    #[error("data quality error: {0}")]
    DataQuality(String),
}
