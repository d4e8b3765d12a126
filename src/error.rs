use thiserror::Error;

use crate::model::Month;

/// Failure taxonomy for the hurricane data pipeline.
///
/// `Fetch`, `MalformedTable`, `MalformedRow` and `Stream` come out of the
/// fetch/parse path. `Calculation` and `Transform` guard the read-only
/// statistics over an already-parsed dataset; the parser's invariants make
/// them reachable only through arithmetic overflow or a non-finite stored
/// average.
#[derive(Debug, Error)]
pub enum HurricaneError {
    /// The remote source could not be reached or answered with an error
    /// status. Carries the underlying cause message; there are no retries.
    #[error("failed to fetch hurricane data from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// No parseable header row, or a header that breaks the table shape.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// A data row whose month key or cell value failed typed coercion.
    #[error("malformed row {month:?}, column {column:?}: {reason}")]
    MalformedRow {
        month: String,
        column: String,
        reason: String,
    },

    /// Transport-level failure while consuming the response body.
    #[error("stream error while reading hurricane data: {0}")]
    Stream(String),

    /// The stored average for a month was unusable as a Poisson rate.
    #[error("calculation failed for {month}: {reason}")]
    Calculation { month: Month, reason: String },

    /// Structural corruption detected while aggregating totals.
    #[error("transform failed: {0}")]
    Transform(String),
}

pub type Result<T> = std::result::Result<T, HurricaneError>;
