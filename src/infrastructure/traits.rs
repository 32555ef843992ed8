//! Filesystem boundary used by the taxonomy and package services.
//!
//! Services only read input tables/documents and write package files, so the
//! trait stays that narrow. `MemoryFileSystem` backs unit tests that check
//! package layout without touching disk.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file content (no parent creation).
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create the parent directory chain of `path`, if it has one.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Write a package file, creating its directory first.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        self.ensure_parent(path)?;
        self.write(path, content)
    }
}

/// Disk-backed implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// In-memory files keyed by path. Directories exist implicitly.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (e.g. an input table).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.lock().insert(path.into(), content.into());
        self
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    pub fn content(&self, path: &Path) -> Option<String> {
        self.lock().get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, String>> {
        // a poisoned map is still a consistent map
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.content(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.lock().insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().keys().any(|p| p.starts_with(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_memory_fs_when_writing_nested_file_then_parent_exists() {
        let fs = MemoryFileSystem::new();

        fs.write_file(Path::new("pkg/objects/A.object"), "<x/>").unwrap();

        assert!(fs.is_file(Path::new("pkg/objects/A.object")));
        assert!(fs.exists(Path::new("pkg/objects")));
        assert!(!fs.is_file(Path::new("pkg/objects")));
        assert_eq!(fs.read_to_string(Path::new("pkg/objects/A.object")).unwrap(), "<x/>");
    }

    #[test]
    fn given_memory_fs_when_reading_missing_file_then_not_found() {
        let err = MemoryFileSystem::new()
            .read_to_string(Path::new("rows.csv"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
