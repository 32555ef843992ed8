//! Leaf record projection: one record per independent entry.

use crate::domain::entities::{EntryAttributes, EntryPath, Level, Taxonomy};
use crate::domain::sanitize::developer_name_for;

/// Separator between path segments in a record label.
pub const LABEL_SEPARATOR: &str = " - ";

/// Maximum display length of a record label, in characters.
pub const MAX_LABEL_CHARS: usize = 40;

/// A single independent entry, flattened with its ancestor path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRecord {
    pub path: EntryPath,
    pub label: String,
    pub developer_name: String,
    pub campaign_name_template: String,
    pub connected_to_year: bool,
}

impl LeafRecord {
    pub fn new(path: EntryPath, attributes: &EntryAttributes) -> Self {
        Self {
            label: label_for(&path),
            developer_name: developer_name_for(path.segments()),
            campaign_name_template: attributes.campaign_name_template.clone(),
            connected_to_year: attributes.connected_to_year,
            path,
        }
    }

    pub fn level(&self) -> Level {
        self.path.level()
    }
}

/// Join the non-empty segments and cut to [`MAX_LABEL_CHARS`].
pub fn label_for(path: &EntryPath) -> String {
    let full = path.segments().collect::<Vec<_>>().join(LABEL_SEPARATOR);
    full.chars().take(MAX_LABEL_CHARS).collect()
}

/// Flatten every independent entry in tree order: each Type's own entry,
/// then per SubType its own entry followed by its Details.
pub fn project_records(taxonomy: &Taxonomy) -> Vec<LeafRecord> {
    let mut records = Vec::new();
    for type_node in taxonomy.types() {
        if let Some(entry) = type_node.entry() {
            records.push(LeafRecord::new(EntryPath::of_type(type_node.name()), entry));
        }
        for subtype in type_node.subtypes() {
            if let Some(entry) = subtype.entry() {
                records.push(LeafRecord::new(
                    EntryPath::of_subtype(type_node.name(), subtype.name()),
                    entry,
                ));
            }
            for detail in subtype.details() {
                records.push(LeafRecord::new(
                    EntryPath::of_detail(type_node.name(), subtype.name(), detail.name()),
                    detail.attributes(),
                ));
            }
        }
    }
    records
}
