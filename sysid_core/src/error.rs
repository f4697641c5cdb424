use thiserror::Error;

/// Why an identification attempt did not produce a model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdentifyError {
    #[error("insufficient data: need at least 3 samples, got {count}")]
    InsufficientData { count: usize },
    #[error("under-determined system: {rows} rows for {cols} columns")]
    Underdetermined { rows: usize, cols: usize },
    #[error("response length {len} does not match {rows} design rows")]
    DimensionMismatch { rows: usize, len: usize },
    #[error("design matrix has no columns")]
    NoColumns,
    #[error("non-finite design cell at row {row}, column {col}")]
    NonFiniteInput { row: usize, col: usize },
    #[error("solver produced non-finite coefficients")]
    NonFiniteSolution,
}

impl IdentifyError {
    /// True for the "add more samples and retry" case; every other variant
    /// means the data itself is degenerate.
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
