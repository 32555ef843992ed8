//! Dependent picklist package service
//!
//! Type values go into a standard value set; SubType and Detail become
//! picklist fields controlled by the level above.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::PackageSummary;
use crate::application::xml;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::DependencyProjection;
use crate::infrastructure::traits::FileSystem;

/// Service writing the dependent picklist package.
pub struct PicklistService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl PicklistService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Default package root from settings.
    pub fn default_output_dir(&self) -> &Path {
        &self.settings.picklists.output_dir
    }

    /// Write the value set, both dependent fields, and package.xml under `out_dir`.
    #[instrument(level = "debug", skip(self, projection))]
    pub fn write_package(
        &self,
        projection: &DependencyProjection,
        out_dir: &Path,
    ) -> ApplicationResult<PackageSummary> {
        let cfg = &self.settings.picklists;
        let mut summary = PackageSummary {
            root: out_dir.to_path_buf(),
            ..PackageSummary::default()
        };

        let value_set_path = out_dir
            .join("standardValueSets")
            .join(format!("{}.standardValueSet-meta.xml", cfg.standard_value_set));
        self.write(&value_set_path, &xml::standard_value_set(&projection.types))?;
        summary.files.push(value_set_path);

        let fields_dir = out_dir.join("objects").join(&cfg.object).join("fields");

        let subtype_path = fields_dir.join(format!("{}.field-meta.xml", cfg.subtype_field));
        self.write(
            &subtype_path,
            &xml::dependent_picklist(
                &cfg.subtype_field,
                &projection.subtypes,
                Some((cfg.type_field.as_str(), &projection.subtype_parents)),
            ),
        )?;
        summary.files.push(subtype_path);

        let detail_path = fields_dir.join(format!("{}.field-meta.xml", cfg.detail_field));
        self.write(
            &detail_path,
            &xml::dependent_picklist(
                &cfg.detail_field,
                &projection.details,
                Some((cfg.subtype_field.as_str(), &projection.detail_parents)),
            ),
        )?;
        summary.files.push(detail_path);

        let manifest = out_dir.join("package.xml");
        self.write(
            &manifest,
            &xml::picklist_package(cfg, &self.settings.api_version),
        )?;
        summary.files.push(manifest);

        summary.members = vec![
            xml::field_member(cfg, &cfg.detail_field),
            xml::field_member(cfg, &cfg.subtype_field),
            cfg.standard_value_set.clone(),
        ];
        summary.members.sort();

        debug!(
            "picklists: {} types, {} subtypes, {} details, {} edges",
            projection.types.len(),
            projection.subtypes.len(),
            projection.details.len(),
            projection.edge_count()
        );
        info!("wrote picklists to {}", out_dir.display());
        Ok(summary)
    }

    fn write(&self, path: &Path, content: &str) -> ApplicationResult<()> {
        self.fs
            .write_file(path, content)
            .with_path_context("write package file", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{project_dependencies, HierarchyBuilder, SourceRow};
    use crate::infrastructure::traits::MemoryFileSystem;

    #[test]
    fn given_renamed_fields_when_writing_package_then_paths_follow_settings() {
        let fs = Arc::new(MemoryFileSystem::new());
        let mut settings = Settings::default();
        settings.picklists.object = "Opportunity".into();
        settings.picklists.subtype_field = "Category__c".into();
        let service = PicklistService::new(fs.clone(), Arc::new(settings));
        let taxonomy = HierarchyBuilder::new()
            .build([SourceRow::new("Kibudim", "Sukkos", "Aliyah", "Yes", "x")])
            .unwrap();

        let summary = service
            .write_package(&project_dependencies(&taxonomy), Path::new("out"))
            .unwrap();

        assert!(fs.is_file(Path::new("out/objects/Opportunity/fields/Category__c.field-meta.xml")));
        let detail = fs
            .content(Path::new("out/objects/Opportunity/fields/Detail__c.field-meta.xml"))
            .unwrap();
        assert!(detail.contains("<controllingField>Category__c</controllingField>"));
        assert_eq!(
            summary.members,
            vec!["CampaignType", "Opportunity.Category__c", "Opportunity.Detail__c"]
        );
    }
}
