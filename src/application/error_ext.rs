//! Error conversion helpers for dataset file access
//!
//! Extension traits attach the offending path to I/O and CSV errors.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// let bytes = fs.read(&path).with_path_context("read dataset file", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait turning CSV decoding errors into `InvalidDataset`.
pub trait CsvResultExt<T> {
    fn in_dataset_file(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> CsvResultExt<T> for Result<T, csv_async::Error> {
    fn in_dataset_file(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::InvalidDataset {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
