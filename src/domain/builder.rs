//! Hierarchy builder: folds source rows into a three-level taxonomy.
//!
//! Nodes live in ordered `Vec`s (first-seen order) with a `HashMap` side index
//! per level for deduplication. The index is dropped by [`HierarchyBuilder::finish`];
//! the resulting [`Taxonomy`] is read-only.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::domain::entities::{
    DetailNode, EntryAttributes, EntryPath, SourceRow, SubTypeNode, Taxonomy, TypeNode,
};
use crate::domain::error::{DomainError, InvalidRowReason};

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Default token that marks a row as connected to a year.
pub const DEFAULT_AFFIRMATIVE_TOKEN: &str = "yes";

/// Constructs a [`Taxonomy`] from rows, merging rows that share a path.
#[derive(Debug)]
pub struct HierarchyBuilder {
    affirmative_token: String,
    types: Vec<TypeNode>,
    type_index: HashMap<String, usize>,
    subtype_index: HashMap<(usize, String), usize>,
    detail_index: HashMap<(usize, usize, String), usize>,
    rows_seen: usize,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            affirmative_token: DEFAULT_AFFIRMATIVE_TOKEN.to_string(),
            types: Vec::new(),
            type_index: HashMap::new(),
            subtype_index: HashMap::new(),
            detail_index: HashMap::new(),
            rows_seen: 0,
        }
    }

    /// Use a different token for "connected to a year" (matched case-insensitively).
    pub fn with_affirmative_token(mut self, token: impl Into<String>) -> Self {
        self.affirmative_token = token.into().trim().to_lowercase();
        self
    }

    /// Build a taxonomy from the complete input. Fails fast on the first invalid row.
    pub fn build<I>(mut self, rows: I) -> TreeResult<Taxonomy>
    where
        I: IntoIterator,
        I::Item: Borrow<SourceRow>,
    {
        for row in rows {
            self.push_row(row.borrow())?;
        }
        Ok(self.finish())
    }

    /// Merge one row into the tree.
    ///
    /// The row is validated before anything is touched, so a rejected row
    /// leaves the builder unchanged.
    pub fn push_row(&mut self, row: &SourceRow) -> TreeResult<()> {
        self.rows_seen += 1;

        let type_name = row.type_name.trim();
        let subtype = row.subtype.trim();
        let detail = row.detail.trim();

        let reject = |reason| DomainError::InvalidRow {
            record: self.rows_seen,
            row: row.clone(),
            reason,
        };
        if type_name.is_empty() {
            return Err(reject(InvalidRowReason::MissingType));
        }
        if subtype.is_empty() && !detail.is_empty() {
            return Err(reject(InvalidRowReason::DetailWithoutSubType));
        }

        let attributes = EntryAttributes {
            campaign_name_template: row.campaign_name.trim().to_string(),
            connected_to_year: self.is_affirmative(&row.connected_to_year),
        };

        let t = self.resolve_type(type_name);
        if subtype.is_empty() {
            self.types[t].entry = Some(attributes);
            return Ok(());
        }

        let s = self.resolve_subtype(t, subtype);
        if detail.is_empty() {
            self.types[t].subtypes[s].entry = Some(attributes);
        } else {
            self.upsert_detail(t, s, detail, attributes);
        }
        Ok(())
    }

    /// Declare a node by path, creating every missing ancestor.
    ///
    /// With `entry` set the node becomes an independent entry (last write wins);
    /// without it the node exists only as a grouping level. Details must carry
    /// attributes.
    pub fn declare(&mut self, path: &EntryPath, entry: Option<EntryAttributes>) -> TreeResult<()> {
        let type_name = path.type_name.trim();
        let subtype = path.subtype.trim();
        let detail = path.detail.trim();

        if type_name.is_empty() {
            return Err(DomainError::invalid_document("node without a type name"));
        }
        if subtype.is_empty() && !detail.is_empty() {
            return Err(DomainError::invalid_document(format!(
                "detail '{detail}' under '{type_name}' has no subtype"
            )));
        }
        if !detail.is_empty() && entry.is_none() {
            return Err(DomainError::invalid_document(format!(
                "detail '{type_name} / {subtype} / {detail}' must be an independent entry"
            )));
        }

        let t = self.resolve_type(type_name);
        if subtype.is_empty() {
            if entry.is_some() {
                self.types[t].entry = entry;
            }
            return Ok(());
        }

        let s = self.resolve_subtype(t, subtype);
        match entry {
            Some(attributes) if !detail.is_empty() => self.upsert_detail(t, s, detail, attributes),
            Some(attributes) => self.types[t].subtypes[s].entry = Some(attributes),
            None => {}
        }
        Ok(())
    }

    /// Number of rows pushed so far, including a rejected one.
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Freeze the tree.
    pub fn finish(self) -> Taxonomy {
        Taxonomy { types: self.types }
    }

    fn is_affirmative(&self, raw: &str) -> bool {
        raw.trim().to_lowercase() == self.affirmative_token
    }

    fn resolve_type(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.type_index.get(name) {
            return idx;
        }
        let idx = self.types.len();
        self.types.push(TypeNode {
            name: name.to_string(),
            entry: None,
            subtypes: Vec::new(),
        });
        self.type_index.insert(name.to_string(), idx);
        idx
    }

    fn resolve_subtype(&mut self, t: usize, name: &str) -> usize {
        let key = (t, name.to_string());
        if let Some(&idx) = self.subtype_index.get(&key) {
            return idx;
        }
        let subtypes = &mut self.types[t].subtypes;
        let idx = subtypes.len();
        subtypes.push(SubTypeNode {
            name: name.to_string(),
            entry: None,
            details: Vec::new(),
        });
        self.subtype_index.insert(key, idx);
        idx
    }

    fn upsert_detail(&mut self, t: usize, s: usize, name: &str, attributes: EntryAttributes) {
        let key = (t, s, name.to_string());
        let details = &mut self.types[t].subtypes[s].details;
        match self.detail_index.get(&key) {
            Some(&idx) => details[idx].attributes = attributes,
            None => {
                self.detail_index.insert(key, details.len());
                details.push(DetailNode {
                    name: name.to_string(),
                    attributes,
                });
            }
        }
    }
}
