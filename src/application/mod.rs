//! Application layer: ingestion, formatting and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod document;
pub mod error;
pub mod error_ext;
pub mod ingest;
pub mod services;
pub mod xml;

pub use document::TaxonomyDocument;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
