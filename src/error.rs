use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Everything that can be wrong with a launch data file.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("column '{column}' has type {found}, expected {expected}")]
    ColumnType {
        column: &'static str,
        found: String,
        expected: &'static str,
    },

    #[error("row {row}: outcome class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: String },

    #[error("row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: &'static str },

    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
