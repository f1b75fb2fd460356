use thiserror::Error;

/// Main error type for the Quarterly system
#[derive(Error, Debug)]
pub enum QtError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while retrieving or parsing company financial data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid CIK '{input}': {reason}")]
    InvalidCik { input: String, reason: String },

    #[error("Company not found: {cik}")]
    CompanyNotFound { cik: String },

    #[error("Upstream returned HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("Data parsing error: {message}")]
    ParseError { message: String },

    #[error("No financial data available for CIK {cik}")]
    NoFinancialData { cik: String },
}

impl DataError {
    /// True when the failure came from the transport or the upstream service
    /// rather than from malformed input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, DataError::Http { .. } | DataError::Request { .. })
    }
}

/// Result type alias for Quarterly operations
pub type QtResult<T> = Result<T, QtError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::QtError::Validation(format!($($arg)*))
    };
}

/// Macro for creating internal errors
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)*) => {
        $crate::QtError::Internal(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::QtError::Config(format!($($arg)*))
    };
}
