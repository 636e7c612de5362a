//! Integration tests for CapStore.
//!
//! The storefront's state lives in JSON files, so these tests exercise the
//! stores end to end against real temporary directories rather than mocking
//! the filesystem.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p capstore-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

/// A unique per-test data directory, removed on drop.
pub struct TestDataDir {
    path: PathBuf,
}

impl TestDataDir {
    /// Create a fresh directory path under the system temp dir.
    ///
    /// The directory itself is created lazily by the first store write.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("capstore-it-{}", uuid::Uuid::new_v4())),
        }
    }

    /// The directory path, for constructing stores.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
