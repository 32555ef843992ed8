//! Taxonomy loading service
//!
//! Reads a source table (CSV) or a hierarchical document (JSON) and builds
//! the immutable taxonomy.

use std::path::Path;
use std::sync::Arc;

use termtree::Tree;
use tracing::{debug, info, instrument};

use crate::application::document::TaxonomyDocument;
use crate::application::ingest::parse_rows;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{HierarchyBuilder, Taxonomy};
use crate::infrastructure::traits::FileSystem;

/// Input format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Flat source table with a header row
    Csv,
    /// Hierarchical JSON document
    Json,
}

impl InputFormat {
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Service for building taxonomies from input files.
pub struct TaxonomyService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl TaxonomyService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Load and build a taxonomy. A single invalid row aborts the whole build.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, input: &Path) -> ApplicationResult<Taxonomy> {
        if !self.fs.is_file(input) {
            return Err(ApplicationError::InputNotFound(input.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(input)
            .with_path_context("read input", input)?;

        let format = InputFormat::detect(input);
        debug!("load: format={:?}", format);
        let taxonomy = match format {
            InputFormat::Json => self.from_document(&content)?,
            InputFormat::Csv => self.from_csv(&content)?,
        };

        info!(
            "built taxonomy: {} types, {} nodes",
            taxonomy.types().len(),
            taxonomy.node_count()
        );
        Ok(taxonomy)
    }

    /// Build from CSV text using the configured columns and affirmative token.
    pub fn from_csv(&self, content: &str) -> ApplicationResult<Taxonomy> {
        let rows = parse_rows(content, &self.settings.columns)?;
        let taxonomy = HierarchyBuilder::new()
            .with_affirmative_token(self.settings.affirmative_token.as_str())
            .build(&rows)?;
        Ok(taxonomy)
    }

    /// Build from a hierarchical JSON document.
    pub fn from_document(&self, content: &str) -> ApplicationResult<Taxonomy> {
        let taxonomy = TaxonomyDocument::from_json(content)?.into_taxonomy()?;
        Ok(taxonomy)
    }

    /// Render the hierarchical document as pretty JSON.
    pub fn document_json(&self, taxonomy: &Taxonomy) -> ApplicationResult<String> {
        TaxonomyDocument::from(taxonomy).to_json_pretty()
    }

    /// Write the hierarchical document, creating parent directories.
    #[instrument(level = "debug", skip(self, taxonomy))]
    pub fn write_document(&self, taxonomy: &Taxonomy, path: &Path) -> ApplicationResult<()> {
        let json = self.document_json(taxonomy)?;
        self.fs
            .write_file(path, &json)
            .with_path_context("write document", path)?;
        info!("wrote document {}", path.display());
        Ok(())
    }
}

/// Tree view of a taxonomy for terminal display. Independent entries carry a `*`.
pub fn display_tree(taxonomy: &Taxonomy, root_label: &str) -> Tree<String> {
    let mark = |name: &str, independent: bool| {
        if independent {
            format!("{name} *")
        } else {
            name.to_string()
        }
    };

    let mut root = Tree::new(root_label.to_string());
    for t in taxonomy.types() {
        let mut type_tree = Tree::new(mark(t.name(), t.is_independent_entry()));
        for s in t.subtypes() {
            let mut subtype_tree = Tree::new(mark(s.name(), s.is_independent_entry()));
            for d in s.details() {
                subtype_tree.push(Tree::new(mark(d.name(), true)));
            }
            type_tree.push(subtype_tree);
        }
        root.push(type_tree);
    }
    root
}
