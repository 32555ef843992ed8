//! Domain entities: the three-level taxonomy tree

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the source table, as read (untrimmed, unparsed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub type_name: String,
    pub subtype: String,
    pub detail: String,
    /// Raw "connected to a year" cell; compared against the affirmative token
    pub connected_to_year: String,
    pub campaign_name: String,
}

impl SourceRow {
    pub fn new(
        type_name: impl Into<String>,
        subtype: impl Into<String>,
        detail: impl Into<String>,
        connected_to_year: impl Into<String>,
        campaign_name: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            subtype: subtype.into(),
            detail: detail.into(),
            connected_to_year: connected_to_year.into(),
            campaign_name: campaign_name.into(),
        }
    }
}

impl fmt::Display for SourceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={:?}, subtype={:?}, detail={:?}, connected_to_year={:?}, campaign_name={:?}",
            self.type_name, self.subtype, self.detail, self.connected_to_year, self.campaign_name
        )
    }
}

/// Taxonomy level of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Type,
    SubType,
    Detail,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Type => "type",
            Level::SubType => "subtype",
            Level::Detail => "detail",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes carried by an independent entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryAttributes {
    /// Campaign name template, may contain a `{year}` placeholder
    pub campaign_name_template: String,
    pub connected_to_year: bool,
}

impl EntryAttributes {
    pub fn new(campaign_name_template: impl Into<String>, connected_to_year: bool) -> Self {
        Self {
            campaign_name_template: campaign_name_template.into(),
            connected_to_year,
        }
    }
}

/// Level 3 node. Always a leaf, always an independent entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailNode {
    pub(crate) name: String,
    pub(crate) attributes: EntryAttributes,
}

impl DetailNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &EntryAttributes {
        &self.attributes
    }
}

/// Level 2 node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTypeNode {
    pub(crate) name: String,
    pub(crate) entry: Option<EntryAttributes>,
    pub(crate) details: Vec<DetailNode>,
}

impl SubTypeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes, present iff this subtype was named on its own by some row.
    pub fn entry(&self) -> Option<&EntryAttributes> {
        self.entry.as_ref()
    }

    pub fn is_independent_entry(&self) -> bool {
        self.entry.is_some()
    }

    /// Details in first-seen order.
    pub fn details(&self) -> &[DetailNode] {
        &self.details
    }

    pub fn detail(&self, name: &str) -> Option<&DetailNode> {
        self.details.iter().find(|d| d.name == name)
    }
}

/// Level 1 (root) node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub(crate) name: String,
    pub(crate) entry: Option<EntryAttributes>,
    pub(crate) subtypes: Vec<SubTypeNode>,
}

impl TypeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes, present iff this type was named on its own by some row.
    pub fn entry(&self) -> Option<&EntryAttributes> {
        self.entry.as_ref()
    }

    pub fn is_independent_entry(&self) -> bool {
        self.entry.is_some()
    }

    /// SubTypes in first-seen order.
    pub fn subtypes(&self) -> &[SubTypeNode] {
        &self.subtypes
    }

    pub fn subtype(&self, name: &str) -> Option<&SubTypeNode> {
        self.subtypes.iter().find(|s| s.name == name)
    }
}

/// Full ancestor path of a node. Finer levels are empty strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath {
    pub type_name: String,
    pub subtype: String,
    pub detail: String,
}

impl EntryPath {
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn of_subtype(type_name: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            subtype: subtype.into(),
            detail: String::new(),
        }
    }

    pub fn of_detail(
        type_name: impl Into<String>,
        subtype: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            subtype: subtype.into(),
            detail: detail.into(),
        }
    }

    /// Level of the node this path addresses.
    pub fn level(&self) -> Level {
        if !self.detail.is_empty() {
            Level::Detail
        } else if !self.subtype.is_empty() {
            Level::SubType
        } else {
            Level::Type
        }
    }

    /// Non-empty segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        [&self.type_name, &self.subtype, &self.detail]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<&str> = self.segments().collect();
        f.write_str(&segments.join(" / "))
    }
}

/// Borrowed view of any node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Type(&'a TypeNode),
    SubType(&'a SubTypeNode),
    Detail(&'a DetailNode),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Type(n) => &n.name,
            NodeRef::SubType(n) => &n.name,
            NodeRef::Detail(n) => &n.name,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            NodeRef::Type(_) => Level::Type,
            NodeRef::SubType(_) => Level::SubType,
            NodeRef::Detail(_) => Level::Detail,
        }
    }

    pub fn attributes(&self) -> Option<&'a EntryAttributes> {
        match self {
            NodeRef::Type(n) => n.entry.as_ref(),
            NodeRef::SubType(n) => n.entry.as_ref(),
            NodeRef::Detail(n) => Some(&n.attributes),
        }
    }

    pub fn is_independent_entry(&self) -> bool {
        self.attributes().is_some()
    }
}

/// The complete, immutable taxonomy: root Type nodes in first-seen order.
///
/// Only [`HierarchyBuilder`](crate::domain::HierarchyBuilder) creates one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    pub(crate) types: Vec<TypeNode>,
}

impl Taxonomy {
    pub fn types(&self) -> &[TypeNode] {
        &self.types
    }

    pub fn type_node(&self, name: &str) -> Option<&TypeNode> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a path to the node it addresses.
    pub fn lookup(&self, path: &EntryPath) -> Option<NodeRef<'_>> {
        let type_node = self.type_node(&path.type_name)?;
        if path.subtype.is_empty() {
            return path
                .detail
                .is_empty()
                .then_some(NodeRef::Type(type_node));
        }
        let subtype = type_node.subtype(&path.subtype)?;
        if path.detail.is_empty() {
            return Some(NodeRef::SubType(subtype));
        }
        subtype.detail(&path.detail).map(NodeRef::Detail)
    }

    /// Total number of nodes across all levels.
    pub fn node_count(&self) -> usize {
        self.types
            .iter()
            .map(|t| {
                1 + t
                    .subtypes
                    .iter()
                    .map(|s| 1 + s.details.len())
                    .sum::<usize>()
            })
            .sum()
    }
}
