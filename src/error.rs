use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur while the
/// report is fetched, merged, or written.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading config or creating directories.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the JSON config file cannot be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Transport-level HTTP failures (DNS, TLS, connection, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raised when the server answers with a non-success status.
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Raised when a fetched document contains no usable table.
    #[error("no table found at {url}")]
    NoTable { url: String },

    /// Raised when a source table lacks a column the merge depends on.
    #[error("column '{column}' missing from {table} table")]
    MissingColumn { column: String, table: String },

    /// Raised when the configuration is structurally valid but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
