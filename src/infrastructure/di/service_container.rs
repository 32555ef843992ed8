//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{PicklistService, RecordService, TaxonomyService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding the settings, the filesystem, and the services built on them.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub taxonomy: TaxonomyService,
    pub records: RecordService,
    pub picklists: PicklistService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self {
            taxonomy: TaxonomyService::new(fs.clone(), settings.clone()),
            records: RecordService::new(fs.clone(), settings.clone()),
            picklists: PicklistService::new(fs.clone(), settings.clone()),
            settings,
            fs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::domain::{project_dependencies, project_records};
    use crate::infrastructure::traits::MemoryFileSystem;

    #[test]
    fn given_memory_fs_when_generating_then_services_share_it() {
        // Arrange
        let fs = Arc::new(MemoryFileSystem::new().with_file(
            "rows.csv",
            "Type,SubType,Detail,Connected to a Year,Campaign Name\nGeneral,,,No,General\n",
        ));
        let container = ServiceContainer::with_deps(Settings::default(), fs.clone());

        // Act
        let taxonomy = container.taxonomy.load(Path::new("rows.csv")).unwrap();
        container
            .records
            .write_package(&project_records(&taxonomy), Path::new("pkg"))
            .unwrap();
        container
            .picklists
            .write_package(&project_dependencies(&taxonomy), Path::new("picklists"))
            .unwrap();

        // Assert
        assert!(container.fs.is_file(Path::new("pkg/package.xml")));
        assert!(fs.is_file(Path::new("picklists/package.xml")));
        assert!(fs.exists(Path::new("pkg/customMetadata")));
    }
}
