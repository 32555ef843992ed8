//! Attach the file being read or written to an `io::Error`.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// `action` reads as a verb phrase: "read input", "write document".
    fn with_path_context(self, action: &'static str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &'static str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Io {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}
