//! taxforge: builds a three-level Type/SubType/Detail taxonomy from a flat
//! source table and projects it into leaf metadata records and dependent
//! picklists.
//!
//! Layers, inner to outer:
//! - `domain`: the taxonomy, its builder, and the pure projections
//! - `application`: ingestion, JSON/XML formatting, and package services
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: argument parsing, dispatch and exit codes

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
