//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod picklists;
mod records;
mod taxonomy;

pub use picklists::PicklistService;
pub use records::{PackageSummary, RecordService};
pub use taxonomy::{display_tree, InputFormat, TaxonomyService};
