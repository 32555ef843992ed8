//! Tests for HierarchyBuilder

use rstest::rstest;

use taxforge::domain::{
    DomainError, EntryAttributes, EntryPath, HierarchyBuilder, InvalidRowReason, Level,
    SourceRow, Taxonomy,
};

fn row(t: &str, s: &str, d: &str, year: &str, campaign: &str) -> SourceRow {
    SourceRow::new(t, s, d, year, campaign)
}

fn build(rows: &[SourceRow]) -> Taxonomy {
    HierarchyBuilder::new().build(rows).expect("build taxonomy")
}

fn sample_rows() -> Vec<SourceRow> {
    vec![
        row("General", "", "", "No", "General"),
        row("General", "Seforim", "", "No", "Seforim"),
        row("Kibudim", "Sukkos", "Aliyah", "Yes", "{year} Sukkos Aliyah"),
        row("Kibudim", "Shabbos", "Aliyah", "Yes", "{year} Shabbos Aliyah"),
        row("Kibudim", "Sukkos", "Hagbah", "Yes", "{year} Sukkos Hagbah"),
        row("Events", "Shabbos", "", "yes", "Shabbos Event"),
        row("General", "Building Fund", "", "", "Building"),
    ]
}

#[test]
fn given_type_and_subtype_rows_when_building_then_both_independent() {
    // Arrange
    let rows = [
        row("General", "", "", "No", "General"),
        row("General", "Seforim", "", "No", "Seforim"),
    ];

    // Act
    let taxonomy = build(&rows);

    // Assert
    assert_eq!(taxonomy.types().len(), 1);
    let general = &taxonomy.types()[0];
    assert_eq!(general.name(), "General");
    assert!(general.is_independent_entry());
    assert_eq!(
        general.entry(),
        Some(&EntryAttributes::new("General", false))
    );

    assert_eq!(general.subtypes().len(), 1);
    let seforim = &general.subtypes()[0];
    assert_eq!(seforim.name(), "Seforim");
    assert!(seforim.is_independent_entry());
    assert_eq!(
        seforim.entry().map(|e| e.campaign_name_template.as_str()),
        Some("Seforim")
    );
}

#[test]
fn given_only_detail_rows_when_building_then_subtype_is_grouping_only() {
    // Arrange
    let rows = [
        row("Kibudim", "Sukkos", "Aliyah", "Yes", "X"),
        row("Kibudim", "Sukkos", "Hagbah", "Yes", "Y"),
    ];

    // Act
    let taxonomy = build(&rows);

    // Assert
    let kibudim = taxonomy.type_node("Kibudim").unwrap();
    assert!(!kibudim.is_independent_entry());
    let sukkos = kibudim.subtype("Sukkos").unwrap();
    assert!(!sukkos.is_independent_entry());
    assert_eq!(sukkos.entry(), None);

    let names: Vec<&str> = sukkos.details().iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["Aliyah", "Hagbah"]);
    assert_eq!(sukkos.details()[0].attributes(), &EntryAttributes::new("X", true));
    assert_eq!(sukkos.details()[1].attributes(), &EntryAttributes::new("Y", true));
}

#[test]
fn given_repeated_types_when_building_then_each_type_is_a_single_root() {
    let taxonomy = build(&sample_rows());

    let names: Vec<&str> = taxonomy.types().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["General", "Kibudim", "Events"]);
}

#[test]
fn given_rows_when_building_then_children_keep_first_seen_order() {
    let taxonomy = build(&sample_rows());

    let general: Vec<&str> = taxonomy
        .type_node("General")
        .unwrap()
        .subtypes()
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(general, vec!["Seforim", "Building Fund"]);

    let kibudim: Vec<&str> = taxonomy
        .type_node("Kibudim")
        .unwrap()
        .subtypes()
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(kibudim, vec!["Sukkos", "Shabbos"]);
}

#[test]
fn given_same_input_twice_when_building_then_trees_are_identical() {
    let first = build(&sample_rows());
    let second = build(&sample_rows());

    assert_eq!(first, second);
    assert_eq!(first.node_count(), second.node_count());
}

#[test]
fn given_same_detail_name_under_two_subtypes_when_building_then_kept_apart() {
    let taxonomy = build(&sample_rows());

    let kibudim = taxonomy.type_node("Kibudim").unwrap();
    let sukkos_aliyah = kibudim.subtype("Sukkos").unwrap().detail("Aliyah").unwrap();
    let shabbos_aliyah = kibudim.subtype("Shabbos").unwrap().detail("Aliyah").unwrap();

    assert_eq!(
        sukkos_aliyah.attributes().campaign_name_template,
        "{year} Sukkos Aliyah"
    );
    assert_eq!(
        shabbos_aliyah.attributes().campaign_name_template,
        "{year} Shabbos Aliyah"
    );
}

#[test]
fn given_repeated_independent_path_when_building_then_last_write_wins() {
    let rows = [
        row("Membership", "", "", "No", "Old"),
        row("Membership", "", "", "Yes", "New"),
    ];

    let taxonomy = build(&rows);

    let membership = taxonomy.type_node("Membership").unwrap();
    assert_eq!(membership.entry(), Some(&EntryAttributes::new("New", true)));
    assert_eq!(taxonomy.node_count(), 1);
}

#[test]
fn given_padded_fields_when_building_then_whitespace_is_stripped() {
    let rows = [row("  Kibudim ", " Sukkos", "Aliyah  ", " YES ", " X ")];

    let taxonomy = build(&rows);

    let detail = taxonomy
        .lookup(&EntryPath::of_detail("Kibudim", "Sukkos", "Aliyah"))
        .unwrap();
    assert_eq!(detail.level(), Level::Detail);
    assert_eq!(detail.attributes(), Some(&EntryAttributes::new("X", true)));
}

#[rstest]
#[case("Yes", true)]
#[case("yes", true)]
#[case("YES", true)]
#[case(" yes ", true)]
#[case("No", false)]
#[case("", false)]
#[case("y", false)]
#[case("true", false)]
#[case("yes please", false)]
fn given_year_cell_when_building_then_parsed_case_insensitively(
    #[case] cell: &str,
    #[case] expected: bool,
) {
    let taxonomy = build(&[row("General", "", "", cell, "General")]);

    let entry = taxonomy.type_node("General").unwrap().entry().unwrap();
    assert_eq!(entry.connected_to_year, expected);
}

#[test]
fn given_custom_token_when_building_then_only_that_token_is_affirmative() {
    let taxonomy = HierarchyBuilder::new()
        .with_affirmative_token("Ja")
        .build([row("A", "", "", "ja", "a"), row("B", "", "", "yes", "b")])
        .unwrap();

    assert!(taxonomy.type_node("A").unwrap().entry().unwrap().connected_to_year);
    assert!(!taxonomy.type_node("B").unwrap().entry().unwrap().connected_to_year);
}

#[rstest]
#[case(row("", "Seforim", "", "No", "Seforim"), InvalidRowReason::MissingType)]
#[case(row("  ", "", "", "No", "x"), InvalidRowReason::MissingType)]
#[case(row("Kibudim", "", "Aliyah", "Yes", "x"), InvalidRowReason::DetailWithoutSubType)]
fn given_malformed_row_when_building_then_whole_build_fails(
    #[case] bad: SourceRow,
    #[case] expected: InvalidRowReason,
) {
    // Arrange
    let rows = vec![row("General", "", "", "No", "General"), bad.clone()];

    // Act
    let result = HierarchyBuilder::new().build(&rows);

    // Assert
    match result {
        Err(DomainError::InvalidRow {
            record,
            row,
            reason,
        }) => {
            assert_eq!(record, 2);
            assert_eq!(row, bad);
            assert_eq!(reason, expected);
        }
        other => panic!("expected InvalidRow, got {other:?}"),
    }
}

#[test]
fn given_paths_when_looking_up_then_resolves_each_level() {
    let taxonomy = build(&sample_rows());

    let general = taxonomy.lookup(&EntryPath::of_type("General")).unwrap();
    assert_eq!(general.level(), Level::Type);
    assert!(general.is_independent_entry());

    let sukkos = taxonomy
        .lookup(&EntryPath::of_subtype("Kibudim", "Sukkos"))
        .unwrap();
    assert_eq!(sukkos.name(), "Sukkos");
    assert!(!sukkos.is_independent_entry());

    assert!(taxonomy
        .lookup(&EntryPath::of_subtype("General", "Sukkos"))
        .is_none());
    assert!(taxonomy.lookup(&EntryPath::of_type("Missing")).is_none());
}

#[test]
fn given_empty_input_when_building_then_taxonomy_is_empty() {
    let taxonomy = build(&[]);

    assert!(taxonomy.is_empty());
    assert_eq!(taxonomy.node_count(), 0);
}
