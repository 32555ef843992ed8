//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::SourceRow;

/// Why a source row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRowReason {
    /// Every row must name a Type.
    MissingType,
    /// A Detail cannot exist without a SubType.
    DetailWithoutSubType,
}

impl std::fmt::Display for InvalidRowReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRowReason::MissingType => write!(f, "type is empty"),
            InvalidRowReason::DetailWithoutSubType => write!(f, "detail given without a subtype"),
        }
    }
}

/// Domain errors represent taxonomy rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid row {record}: {reason} ({row})")]
    InvalidRow {
        /// 1-based position of the row in the input sequence
        record: usize,
        row: SourceRow,
        reason: InvalidRowReason,
    },

    #[error("invalid taxonomy document: {message}")]
    InvalidDocument { message: String },
}

impl DomainError {
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}
