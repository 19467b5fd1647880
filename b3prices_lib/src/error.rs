//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding validation and export failures.
#[derive(Debug)]
pub enum Error {
    /// An error from the underlying API client.
    Api(brapi_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Writing an export file failed.
    Io(std::io::Error),
    /// CSV encoding failed.
    Csv(csv::Error),
    /// XLSX encoding failed.
    Xlsx(rust_xlsxwriter::XlsxError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
            Self::Xlsx(e) => write!(f, "XLSX error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Xlsx(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<brapi_api::Error> for Error {
    fn from(e: brapi_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(e)
    }
}
