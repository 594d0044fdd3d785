//! Error types for catalog loading and lookups.
//!
//! Loading failures never reach API consumers (the loader degrades to an
//! empty dataset), but [`crate::CsvSource::try_load`] still reports them
//! precisely so callers can log or display them.

use std::fmt;

/// Catalog error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "video").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The backing file could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a well-formed video table.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Map this error to an HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Io(_) | Error::Csv(_) => 500,
        }
    }

    /// Create a new NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Result type alias using the catalog Error type.
pub type Result<T> = std::result::Result<T, Error>;
