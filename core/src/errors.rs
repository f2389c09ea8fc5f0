use thiserror::Error;

/// Error taxonomy for the log store and import/export paths.
///
/// Absence of a record is never an error — lookups return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A date key that is missing, empty, or not `YYYY-MM-DD`.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Import payload that cannot be parsed at all.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The underlying SQLite store could not be opened or transacted.
    #[error("storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
