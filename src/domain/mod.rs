//! Domain layer: taxonomy model, hierarchy builder and projections
//!
//! This layer is independent of external concerns (no I/O, no formatting, no logging).

pub mod builder;
pub mod dependencies;
pub mod entities;
pub mod error;
pub mod records;
pub mod sanitize;

pub use builder::{HierarchyBuilder, TreeResult, DEFAULT_AFFIRMATIVE_TOKEN};
pub use dependencies::{project_dependencies, DependencyMap, DependencyProjection};
pub use entities::*;
pub use error::{DomainError, InvalidRowReason};
pub use records::{label_for, project_records, LeafRecord, LABEL_SEPARATOR, MAX_LABEL_CHARS};
pub use sanitize::{developer_name, developer_name_for};
