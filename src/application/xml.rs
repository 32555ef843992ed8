//! Metadata XML rendering for record and picklist packages.
//!
//! Pure string builders; file placement lives in the services.

use std::collections::BTreeSet;

use itertools::Itertools;
use quick_xml::escape::{escape, partial_escape};

use crate::config::{PicklistSettings, RecordSettings};
use crate::domain::{DependencyMap, LeafRecord};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const METADATA_NS: &str = "http://soap.sforce.com/2006/04/metadata";

/// Field API names of the leaf record metadata type.
pub const FIELD_TYPE: &str = "Type__c";
pub const FIELD_SUBTYPE: &str = "SubType__c";
pub const FIELD_DETAIL: &str = "Detail__c";
pub const FIELD_CAMPAIGN_NAME: &str = "Campaign_Name__c";
pub const FIELD_HAS_YEAR: &str = "Has_Year__c";

fn text_field(full_name: &str, label: &str) -> String {
    format!(
        r#"    <fields>
        <fullName>{full_name}</fullName>
        <externalId>false</externalId>
        <label>{label}</label>
        <length>255</length>
        <required>false</required>
        <type>Text</type>
        <unique>false</unique>
    </fields>"#
    )
}

/// Definition of the custom metadata type holding one row per leaf record.
pub fn object_definition(settings: &RecordSettings) -> String {
    let mut lines = vec![
        XML_DECLARATION.to_string(),
        format!(r#"<CustomObject xmlns="{METADATA_NS}">"#),
        format!("    <label>{}</label>", escape(settings.object_label.as_str())),
        format!("    <pluralLabel>{}</pluralLabel>", escape(settings.plural_label.as_str())),
        "    <visibility>Public</visibility>".to_string(),
        text_field(FIELD_TYPE, "Type"),
        text_field(FIELD_SUBTYPE, "Sub Type"),
        text_field(FIELD_DETAIL, "Detail"),
        text_field(FIELD_CAMPAIGN_NAME, "Campaign Name Format"),
    ];
    lines.push(format!(
        r#"    <fields>
        <fullName>{FIELD_HAS_YEAR}</fullName>
        <defaultValue>false</defaultValue>
        <externalId>false</externalId>
        <label>Connected To Year</label>
        <type>Checkbox</type>
    </fields>"#
    ));
    lines.push("</CustomObject>".to_string());
    lines.join("\n") + "\n"
}

/// Member name of a record in package.xml, e.g. `Financial_Campaign_Config.General`.
pub fn record_member(settings: &RecordSettings, record: &LeafRecord) -> String {
    format!("{}.{}", settings.file_prefix, record.developer_name)
}

fn value_lines(lines: &mut Vec<String>, field: &str, xsi_type: &str, value: &str) {
    lines.push("    <values>".to_string());
    lines.push(format!("        <field>{field}</field>"));
    lines.push(format!(r#"        <value xsi:type="{xsi_type}">{value}</value>"#));
    lines.push("    </values>".to_string());
}

/// One custom metadata record document.
pub fn metadata_record(settings: &RecordSettings, record: &LeafRecord) -> String {
    let mut lines = vec![
        XML_DECLARATION.to_string(),
        format!(
            r#"<CustomMetadata xmlns="{METADATA_NS}" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="{}">"#,
            settings.object_name
        ),
        format!("    <label>{}</label>", escape(record.label.as_str())),
        "    <protected>false</protected>".to_string(),
    ];

    let strings = [
        (FIELD_TYPE, record.path.type_name.as_str()),
        (FIELD_SUBTYPE, record.path.subtype.as_str()),
        (FIELD_DETAIL, record.path.detail.as_str()),
        (FIELD_CAMPAIGN_NAME, record.campaign_name_template.as_str()),
    ];
    for (field, value) in strings {
        value_lines(&mut lines, field, "xsd:string", &escape(value));
    }
    value_lines(
        &mut lines,
        FIELD_HAS_YEAR,
        "xsd:boolean",
        if record.connected_to_year { "true" } else { "false" },
    );

    lines.push("</CustomMetadata>".to_string());
    lines.join("\n")
}

fn package(types: &[(String, Vec<String>)], api_version: &str) -> String {
    let mut lines = vec![
        XML_DECLARATION.to_string(),
        format!(r#"<Package xmlns="{METADATA_NS}">"#),
    ];
    for (name, members) in types {
        lines.push("    <types>".to_string());
        lines.extend(members.iter().map(|m| format!("        <members>{m}</members>")));
        lines.push(format!("        <name>{name}</name>"));
        lines.push("    </types>".to_string());
    }
    lines.push(format!("    <version>{api_version}</version>"));
    lines.push("</Package>".to_string());
    lines.join("\n")
}

/// Manifest for the record package: the object plus every record, members sorted.
pub fn record_package(settings: &RecordSettings, members: &[String], api_version: &str) -> String {
    package(
        &[
            ("CustomObject".to_string(), vec![settings.object_name.clone()]),
            (
                "CustomMetadata".to_string(),
                members.iter().sorted().cloned().collect(),
            ),
        ],
        api_version,
    )
}

/// Standard value set holding the Type values (controls nothing itself).
pub fn standard_value_set(values: &BTreeSet<String>) -> String {
    let mut lines = vec![
        XML_DECLARATION.to_string(),
        format!(r#"<StandardValueSet xmlns="{METADATA_NS}">"#),
        "    <sorted>false</sorted>".to_string(),
    ];
    for value in values.iter().sorted() {
        let clean = partial_escape(value.as_str());
        lines.push("    <standardValue>".to_string());
        lines.push(format!("        <fullName>{clean}</fullName>"));
        lines.push("        <default>false</default>".to_string());
        lines.push(format!("        <label>{clean}</label>"));
        lines.push("    </standardValue>".to_string());
    }
    lines.push("</StandardValueSet>".to_string());
    lines.join("\n")
}

/// Picklist field definition, optionally dependent on a controlling field.
///
/// Each value with at least one parent in `dependencies` gets a
/// `valueSettings` block listing its parents, sorted.
pub fn dependent_picklist(
    field_api_name: &str,
    values: &BTreeSet<String>,
    controlling: Option<(&str, &DependencyMap)>,
) -> String {
    let label = field_api_name
        .strip_suffix("__c")
        .unwrap_or(field_api_name);
    let mut lines = vec![
        XML_DECLARATION.to_string(),
        format!(r#"<CustomField xmlns="{METADATA_NS}">"#),
        format!("    <fullName>{field_api_name}</fullName>"),
        format!("    <label>{label}</label>"),
        "    <type>Picklist</type>".to_string(),
        "    <valueSet>".to_string(),
    ];
    if let Some((controlling_field, _)) = controlling {
        lines.push(format!("        <controllingField>{controlling_field}</controllingField>"));
    }

    lines.push("        <valueSetDefinition>".to_string());
    lines.push("            <sorted>false</sorted>".to_string());
    for value in values.iter().sorted() {
        let clean = partial_escape(value.as_str());
        lines.push("            <value>".to_string());
        lines.push(format!("                <fullName>{clean}</fullName>"));
        lines.push("                <default>false</default>".to_string());
        lines.push(format!("                <label>{clean}</label>"));
        lines.push("            </value>".to_string());
    }
    lines.push("        </valueSetDefinition>".to_string());

    if let Some((_, dependencies)) = controlling {
        for value in values.iter().sorted() {
            let Some(parents) = dependencies.get(value).filter(|p| !p.is_empty()) else {
                continue;
            };
            lines.push("        <valueSettings>".to_string());
            lines.push(format!("            <valueName>{}</valueName>", partial_escape(value.as_str())));
            for parent in parents.iter().sorted() {
                lines.push(format!(
                    "            <controllingFieldValue>{}</controllingFieldValue>",
                    partial_escape(parent.as_str())
                ));
            }
            lines.push("        </valueSettings>".to_string());
        }
    }

    lines.push("    </valueSet>".to_string());
    lines.push("</CustomField>".to_string());
    lines.join("\n")
}

/// Member name of a field in package.xml, e.g. `Campaign.SubType__c`.
pub fn field_member(settings: &PicklistSettings, field: &str) -> String {
    format!("{}.{}", settings.object, field)
}

/// Manifest for the picklist package.
pub fn picklist_package(settings: &PicklistSettings, api_version: &str) -> String {
    package(
        &[
            (
                "CustomField".to_string(),
                vec![
                    field_member(settings, &settings.subtype_field),
                    field_member(settings, &settings.detail_field),
                ],
            ),
            (
                "StandardValueSet".to_string(),
                vec![settings.standard_value_set.clone()],
            ),
        ],
        api_version,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryAttributes, EntryPath};

    fn record(path: EntryPath, campaign: &str, year: bool) -> LeafRecord {
        LeafRecord::new(path, &EntryAttributes::new(campaign, year))
    }

    #[test]
    fn given_record_with_quotes_when_rendering_then_escapes_label_and_values() {
        let r = record(
            EntryPath::of_subtype("Shul Renovation", "Men's Mikvah"),
            "Men's Mikvah & \"more\"",
            false,
        );

        let xml = metadata_record(&RecordSettings::default(), &r);

        assert!(xml.contains("<label>Shul Renovation - Men&apos;s Mikvah</label>"));
        assert!(xml.contains(
            r#"<value xsi:type="xsd:string">Men&apos;s Mikvah &amp; &quot;more&quot;</value>"#
        ));
        assert!(xml.contains(r#"<value xsi:type="xsd:boolean">false</value>"#));
        assert!(xml.contains(r#"xsi:type="Financial_Campaign_Config__mdt""#));
    }

    #[test]
    fn given_type_record_when_rendering_then_lower_levels_are_empty_strings() {
        let r = record(EntryPath::of_type("Membership"), "{year} - Membership", true);

        let xml = metadata_record(&RecordSettings::default(), &r);

        assert!(xml.contains(
            "        <field>SubType__c</field>\n        <value xsi:type=\"xsd:string\"></value>"
        ));
        assert!(xml.contains(r#"<value xsi:type="xsd:boolean">true</value>"#));
    }

    #[test]
    fn given_members_when_rendering_package_then_sorted_after_object() {
        let members = vec![
            "Financial_Campaign_Config.Kibudim_Shabbos".to_string(),
            "Financial_Campaign_Config.General".to_string(),
        ];

        let xml = record_package(&RecordSettings::default(), &members, "58.0");

        let general = xml.find("Financial_Campaign_Config.General").unwrap();
        let shabbos = xml.find("Financial_Campaign_Config.Kibudim_Shabbos").unwrap();
        let object = xml.find("<members>Financial_Campaign_Config__mdt</members>").unwrap();
        assert!(object < general && general < shabbos);
        assert!(xml.ends_with("    <version>58.0</version>\n</Package>"));
    }

    #[test]
    fn given_dependencies_when_rendering_field_then_writes_value_settings() {
        let values: BTreeSet<String> = ["Sukkos", "Shabbos"].into_iter().map(String::from).collect();
        let mut deps = DependencyMap::new();
        deps.entry("Shabbos".to_string())
            .or_default()
            .extend(["Kibudim".to_string(), "Events".to_string()]);

        let xml = dependent_picklist("SubType__c", &values, Some(("Type", &deps)));

        assert!(xml.contains("<label>SubType</label>"));
        assert!(xml.contains("<controllingField>Type</controllingField>"));
        assert!(xml.contains(
            "            <valueName>Shabbos</valueName>\n            <controllingFieldValue>Events</controllingFieldValue>\n            <controllingFieldValue>Kibudim</controllingFieldValue>"
        ));
        assert!(!xml.contains("<valueName>Sukkos</valueName>"));
    }

    #[test]
    fn given_ampersand_in_value_when_rendering_value_set_then_partially_escaped() {
        let values: BTreeSet<String> = ["Hall & Rental's".to_string()].into_iter().collect();

        let xml = standard_value_set(&values);

        assert!(xml.contains("<fullName>Hall &amp; Rental's</fullName>"));
    }

    #[test]
    fn given_settings_when_rendering_picklist_package_then_lists_fields_and_value_set() {
        let xml = picklist_package(&PicklistSettings::default(), "58.0");
        assert!(xml.contains("<members>Campaign.SubType__c</members>"));
        assert!(xml.contains("<members>Campaign.Detail__c</members>"));
        assert!(xml.contains("<members>CampaignType</members>\n        <name>StandardValueSet</name>"));
    }
}
