//! Error types for return calculations and data loading

use thiserror::Error;

/// Category of a calculation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InsufficientData,
    NumericDomainError,
}

/// Errors raised by series construction and ARR computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArrError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Numeric domain error in {year}: {reason}")]
    NumericDomainError { year: i32, reason: String },
}

impl ArrError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ArrError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn numeric_domain(year: i32, reason: impl Into<String>) -> Self {
        ArrError::NumericDomainError {
            year,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ArrError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ArrError::InsufficientData(_) => ErrorKind::InsufficientData,
            ArrError::NumericDomainError { .. } => ErrorKind::NumericDomainError,
        }
    }
}

pub type ArrResult<T> = Result<T, ArrError>;

/// Errors raised while reading series from CSV
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid series data: {0}")]
    Series(#[from] ArrError),
}
