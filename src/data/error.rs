use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – everything the pipeline can report to the UI
// ---------------------------------------------------------------------------

/// Errors produced by the loading / filtering / aggregation pipeline.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file is missing, unreadable, malformed, or lacks a
    /// required column. Carries the human-readable cause chain.
    #[error("failed to load dataset: {0}")]
    DatasetLoad(String),

    /// A filter or aggregation referenced a column the dataset does not have.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A statistic was requested over zero rows (or zero numeric values).
    #[error("no values to aggregate")]
    EmptyInput,

    /// The progress target must be strictly positive.
    #[error("invalid progress target {0}, must be > 0")]
    InvalidTarget(f64),
}
