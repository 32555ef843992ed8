//! Dependency projection: value sets per level and child → parent-set edges.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::Taxonomy;

/// Child value → every parent value it appears under.
pub type DependencyMap = BTreeMap<String, BTreeSet<String>>;

/// Picklist values and legal parent/child pairings derived from a taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyProjection {
    pub types: BTreeSet<String>,
    pub subtypes: BTreeSet<String>,
    pub details: BTreeSet<String>,
    /// SubType → Types
    pub subtype_parents: DependencyMap,
    /// Detail → SubTypes
    pub detail_parents: DependencyMap,
}

impl DependencyProjection {
    /// Parents of a SubType value, empty if the value is unknown.
    pub fn parents_of_subtype(&self, subtype: &str) -> impl Iterator<Item = &str> {
        self.subtype_parents
            .get(subtype)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Parents of a Detail value, empty if the value is unknown.
    pub fn parents_of_detail(&self, detail: &str) -> impl Iterator<Item = &str> {
        self.detail_parents
            .get(detail)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Number of (child, parent) pairs across both levels.
    pub fn edge_count(&self) -> usize {
        self.subtype_parents
            .values()
            .chain(self.detail_parents.values())
            .map(BTreeSet::len)
            .sum()
    }
}

/// Collect every node name per level (independent or not) and union the
/// parents of each SubType and Detail name across all its occurrences.
pub fn project_dependencies(taxonomy: &Taxonomy) -> DependencyProjection {
    let mut projection = DependencyProjection::default();

    for type_node in taxonomy.types() {
        projection.types.insert(type_node.name().to_string());

        for subtype in type_node.subtypes() {
            projection.subtypes.insert(subtype.name().to_string());
            projection
                .subtype_parents
                .entry(subtype.name().to_string())
                .or_default()
                .insert(type_node.name().to_string());

            for detail in subtype.details() {
                projection.details.insert(detail.name().to_string());
                projection
                    .detail_parents
                    .entry(detail.name().to_string())
                    .or_default()
                    .insert(subtype.name().to_string());
            }
        }
    }

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::HierarchyBuilder;
    use crate::domain::entities::SourceRow;

    #[test]
    fn given_subtype_under_two_types_when_projecting_then_keeps_both_parents() {
        let taxonomy = HierarchyBuilder::new()
            .build([
                SourceRow::new("Kibudim", "Shabbos", "", "Yes", "{year} - Shabbos Kibud"),
                SourceRow::new("Events", "Shabbos", "", "Yes", "{year} - Shabbos"),
            ])
            .unwrap();

        let projection = project_dependencies(&taxonomy);

        let parents: Vec<&str> = projection.parents_of_subtype("Shabbos").collect();
        assert_eq!(parents, vec!["Events", "Kibudim"]);
        assert_eq!(projection.subtypes.len(), 1);
    }

    #[test]
    fn given_grouping_nodes_when_projecting_then_values_still_listed() {
        let taxonomy = HierarchyBuilder::new()
            .build([
                SourceRow::new("Kibudim", "Sukkos", "Aliyah", "Yes", "x"),
                SourceRow::new("Kibudim", "Simchas Torah", "Aliyah", "Yes", "y"),
            ])
            .unwrap();

        let projection = project_dependencies(&taxonomy);

        assert!(projection.types.contains("Kibudim"));
        assert!(projection.subtypes.contains("Sukkos"));
        assert_eq!(projection.details.len(), 1);
        let parents: Vec<&str> = projection.parents_of_detail("Aliyah").collect();
        assert_eq!(parents, vec!["Simchas Torah", "Sukkos"]);
        assert_eq!(projection.edge_count(), 4);
    }

    #[test]
    fn given_unknown_value_when_asking_parents_then_empty() {
        let projection = DependencyProjection::default();
        assert_eq!(projection.parents_of_detail("Nope").count(), 0);
    }
}
