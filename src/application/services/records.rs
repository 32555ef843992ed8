//! Leaf record package service
//!
//! Writes the custom metadata type, one record document per leaf record,
//! and the package manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::xml;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::LeafRecord;
use crate::infrastructure::traits::FileSystem;

/// Files and manifest members produced by a package writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSummary {
    /// Package root directory
    pub root: PathBuf,
    /// Every file written, in write order (package.xml last)
    pub files: Vec<PathBuf>,
    /// Manifest members, sorted
    pub members: Vec<String>,
}

/// Service writing the leaf record metadata package.
pub struct RecordService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl RecordService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Default package root from settings.
    pub fn default_output_dir(&self) -> &Path {
        &self.settings.records.output_dir
    }

    /// Write the object definition, all records, and package.xml under `out_dir`.
    #[instrument(level = "debug", skip(self, records))]
    pub fn write_package(
        &self,
        records: &[LeafRecord],
        out_dir: &Path,
    ) -> ApplicationResult<PackageSummary> {
        let cfg = &self.settings.records;
        let mut summary = PackageSummary {
            root: out_dir.to_path_buf(),
            ..PackageSummary::default()
        };

        let object_path = out_dir
            .join("objects")
            .join(format!("{}.object", cfg.object_name));
        self.write(&object_path, &xml::object_definition(cfg))?;
        summary.files.push(object_path);

        let records_dir = out_dir.join("customMetadata");
        for record in records {
            let member = xml::record_member(cfg, record);
            let path = records_dir.join(format!("{member}.md-meta.xml"));
            debug!("record {} -> {}", record.path, path.display());
            self.write(&path, &xml::metadata_record(cfg, record))?;
            summary.files.push(path);
            summary.members.push(member);
        }
        summary.members.sort();

        let manifest = out_dir.join("package.xml");
        self.write(
            &manifest,
            &xml::record_package(cfg, &summary.members, &self.settings.api_version),
        )?;
        summary.files.push(manifest);

        info!(
            "wrote {} records to {}",
            summary.members.len(),
            out_dir.display()
        );
        Ok(summary)
    }

    fn write(&self, path: &Path, content: &str) -> ApplicationResult<()> {
        self.fs
            .write_file(path, content)
            .with_path_context("write package file", path)
    }
}
