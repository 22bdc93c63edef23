//! Error types for settlefield

use thiserror::Error;

/// Main error type for settlement field operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid interpolation scheme: '{value}' (expected linear, cubic or nearest)")]
    InvalidScheme { value: String },

    #[error("Invalid dimension: '{value}' (expected 1D or 2D)")]
    InvalidDimension { value: String },

    #[error("Insufficient points for {context}: need at least {required}, got {actual}")]
    InsufficientPoints {
        required: usize,
        actual: usize,
        context: String,
    },

    #[error("Duplicate load case id: {0}")]
    DuplicateLoadCase(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias for settlefield operations
pub type Result<T> = std::result::Result<T, Error>;
