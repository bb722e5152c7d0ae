//! Temporary directory management for tests.
//!
//! [`TestDir`] wraps [`tempfile::TempDir`] with a cleaner API for common
//! test patterns.

// Test utilities are expected to panic on failure - that's their purpose
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A managed temporary directory for tests.
///
/// The directory is automatically cleaned up when this struct is dropped.
///
/// # Example
///
/// ```
/// use rollbook_test_utils::TestDir;
///
/// let dir = TestDir::new();
/// let snap_path = dir.join("registry.snap");
/// // Use snap_path for a snapshot file...
/// // Directory cleaned up when `dir` goes out of scope
/// ```
pub struct TestDir {
    inner: TempDir,
}

impl TestDir {
    /// Create a new temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let inner = TempDir::new().expect("failed to create temp directory");
        Self { inner }
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Joins a file name onto the directory path.
    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_exists_and_joins() {
        let dir = TestDir::new();
        assert!(dir.path().is_dir());
        let file = dir.join("a.snap");
        assert_eq!(file.parent(), Some(dir.path()));
    }

    #[test]
    fn test_dir_cleaned_up_on_drop() {
        let path = {
            let dir = TestDir::new();
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
