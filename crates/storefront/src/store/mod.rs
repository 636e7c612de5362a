//! Local JSON-file stores.
//!
//! Each store owns one JSON file under the configured data directory and an
//! in-memory cache invalidated on write. Reads fail soft: a missing or
//! malformed file yields the store's default value rather than an error, so
//! every view can always render. Writes rewrite the whole file; the
//! storefront assumes a single active process, so there is no locking
//! against concurrent writers beyond in-process mutual exclusion.
//!
//! # Files
//!
//! - `catalog.json` - JSON array of products
//! - `cart.json` - JSON array of cart entries
//! - `profile.json` - single profile object

pub mod cart;
pub mod catalog;
pub mod profile;

pub use cart::CartStore;
pub use catalog::{CatalogError, CatalogStore, PurchaseOutcome};
pub use profile::ProfileStore;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by store writes. Reads never error (they fail soft).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file or its directory could not be written.
    #[error("failed to write {name} store: {source}")]
    Write {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    /// The in-memory value could not be serialized.
    #[error("failed to encode {name} store: {source}")]
    Encode {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One JSON blob on disk.
#[derive(Debug)]
pub(crate) struct JsonFile {
    name: &'static str,
    path: PathBuf,
}

impl JsonFile {
    pub(crate) fn new(data_dir: &Path, name: &'static str, file_name: &str) -> Self {
        Self {
            name,
            path: data_dir.join(file_name),
        }
    }

    /// Read and deserialize the file, failing soft to `T::default()`.
    ///
    /// A missing file is the normal first-run state; a malformed file is
    /// logged and treated as empty rather than crashing the view.
    pub(crate) fn read<T: DeserializeOwned + Default>(&self) -> T {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::warn!(store = self.name, error = %e, "store file unreadable, using defaults");
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(store = self.name, error = %e, "store file malformed, using defaults");
                T::default()
            }
        }
    }

    /// Serialize and overwrite the file, creating the data directory first.
    pub(crate) fn write<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
            name: self.name,
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                name: self.name,
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            name: self.name,
            source,
        })
    }
}
