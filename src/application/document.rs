//! Hierarchical JSON document of a taxonomy.
//!
//! Shape: an array of Type objects, each with optional `subtypes`, each of
//! those with optional `details`. Attributes appear only on independent entries.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    DomainError, EntryAttributes, EntryPath, HierarchyBuilder, Level, Taxonomy, TreeResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub level: Level,
    pub independent_entry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_to_year: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTypeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub level: Level,
    pub independent_entry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_to_year: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<DetailEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub level: Level,
    pub independent_entry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_to_year: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<SubTypeEntry>,
}

/// Serializable form of a [`Taxonomy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyDocument {
    pub types: Vec<TypeEntry>,
}

fn split(entry: Option<&EntryAttributes>) -> (Option<String>, Option<bool>) {
    match entry {
        Some(a) => (Some(a.campaign_name_template.clone()), Some(a.connected_to_year)),
        None => (None, None),
    }
}

impl From<&Taxonomy> for TaxonomyDocument {
    fn from(taxonomy: &Taxonomy) -> Self {
        let types = taxonomy
            .types()
            .iter()
            .map(|t| {
                let (campaign_name, connected_to_year) = split(t.entry());
                TypeEntry {
                    name: t.name().to_string(),
                    level: Level::Type,
                    independent_entry: t.is_independent_entry(),
                    campaign_name,
                    connected_to_year,
                    subtypes: t
                        .subtypes()
                        .iter()
                        .map(|s| {
                            let (campaign_name, connected_to_year) = split(s.entry());
                            SubTypeEntry {
                                name: s.name().to_string(),
                                level: Level::SubType,
                                independent_entry: s.is_independent_entry(),
                                campaign_name,
                                connected_to_year,
                                details: s
                                    .details()
                                    .iter()
                                    .map(|d| DetailEntry {
                                        name: d.name().to_string(),
                                        level: Level::Detail,
                                        independent_entry: true,
                                        campaign_name: Some(
                                            d.attributes().campaign_name_template.clone(),
                                        ),
                                        connected_to_year: Some(d.attributes().connected_to_year),
                                    })
                                    .collect(),
                            }
                        })
                        .collect(),
                }
            })
            .collect();
        Self { types }
    }
}

impl TaxonomyDocument {
    pub fn from_json(content: &str) -> ApplicationResult<Self> {
        serde_json::from_str(content).map_err(|e| ApplicationError::Document {
            message: e.to_string(),
        })
    }

    /// Pretty JSON with 4-space indentation.
    pub fn to_json_pretty(&self) -> ApplicationResult<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| ApplicationError::Document {
                message: e.to_string(),
            })?;
        String::from_utf8(buf).map_err(|e| ApplicationError::Document {
            message: e.to_string(),
        })
    }

    /// Rebuild the taxonomy, re-checking the tree invariants.
    ///
    /// Repeated sibling names merge into one node, same as repeated rows.
    pub fn into_taxonomy(self) -> TreeResult<Taxonomy> {
        let mut builder = HierarchyBuilder::new();

        for t in self.types {
            expect_node(&t.name, t.level, Level::Type)?;
            let type_path = EntryPath::of_type(t.name.as_str());
            let entry = attributes(&type_path, t.independent_entry, t.campaign_name, t.connected_to_year)?;
            builder.declare(&type_path, entry)?;

            for s in t.subtypes {
                expect_node(&s.name, s.level, Level::SubType)?;
                let subtype_path = EntryPath::of_subtype(t.name.as_str(), s.name.as_str());
                let entry =
                    attributes(&subtype_path, s.independent_entry, s.campaign_name, s.connected_to_year)?;
                builder.declare(&subtype_path, entry)?;

                for d in s.details {
                    expect_node(&d.name, d.level, Level::Detail)?;
                    let detail_path = EntryPath::of_detail(t.name.as_str(), s.name.as_str(), d.name.as_str());
                    let entry =
                        attributes(&detail_path, d.independent_entry, d.campaign_name, d.connected_to_year)?;
                    builder.declare(&detail_path, entry)?;
                }
            }
        }

        Ok(builder.finish())
    }
}

fn expect_node(name: &str, found: Level, expected: Level) -> TreeResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_document(format!("{expected} with an empty name")));
    }
    if found != expected {
        return Err(DomainError::invalid_document(format!(
            "'{name}' is tagged '{found}' but nested as '{expected}'"
        )));
    }
    Ok(())
}

fn attributes(
    path: &EntryPath,
    independent: bool,
    campaign_name: Option<String>,
    connected_to_year: Option<bool>,
) -> TreeResult<Option<EntryAttributes>> {
    if !independent {
        return Ok(None);
    }
    let campaign_name = campaign_name.ok_or_else(|| {
        DomainError::invalid_document(format!("independent entry '{path}' has no campaignName"))
    })?;
    Ok(Some(EntryAttributes::new(
        campaign_name,
        connected_to_year.unwrap_or(false),
    )))
}
