//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("cannot read source table: {message}")]
    Ingest { message: String },

    #[error("cannot read taxonomy document: {message}")]
    Document { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApplicationError {
    /// True when the input data itself is at fault (bad row, bad document, bad table).
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(_)
                | ApplicationError::Ingest { .. }
                | ApplicationError::Document { .. }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
