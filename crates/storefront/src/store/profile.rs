//! The customer profile store.

use std::path::Path;
use std::sync::Mutex;

use capstore_core::Profile;

use super::{JsonFile, StoreError};

/// JSON-file-backed single-record profile store.
#[derive(Debug)]
pub struct ProfileStore {
    file: JsonFile,
    cache: Mutex<Option<Profile>>,
}

impl ProfileStore {
    /// Open the profile store under the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(data_dir, "profile", "profile.json"),
            cache: Mutex::new(None),
        }
    }

    /// Load the profile, defaulting to an empty one when absent or malformed.
    #[must_use]
    pub fn load(&self) -> Profile {
        let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(profile) = cache.as_ref() {
            return profile.clone();
        }
        let profile: Profile = self.file.read();
        *cache = Some(profile.clone());
        profile
    }

    /// Overwrite the stored profile wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn save(&self, profile: Profile) -> Result<(), StoreError> {
        let result = self.file.write(&profile);
        let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *cache = match &result {
            Ok(()) => Some(profile),
            Err(_) => None,
        };
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::test_support::TempDataDir;
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let dir = TempDataDir::new();
        let store = ProfileStore::new(&dir.0);
        assert_eq!(store.load(), Profile::default());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = TempDataDir::new();
        let store = ProfileStore::new(&dir.0);

        store
            .save(Profile {
                name: "Ada".to_owned(),
                address: "1 Loop Rd".to_owned(),
                photo: Some("data:image/png;base64,AAAA".to_owned()),
            })
            .unwrap();
        store
            .save(Profile {
                name: "Grace".to_owned(),
                address: String::new(),
                photo: None,
            })
            .unwrap();

        let reopened = ProfileStore::new(&dir.0);
        let profile = reopened.load();
        assert_eq!(profile.name, "Grace");
        assert!(profile.photo.is_none());
    }

    #[test]
    fn test_malformed_profile_fails_soft() {
        let dir = TempDataDir::new();
        std::fs::create_dir_all(&dir.0).unwrap();
        std::fs::write(dir.0.join("profile.json"), b"\"just a string\"").unwrap();

        let store = ProfileStore::new(&dir.0);
        assert_eq!(store.load(), Profile::default());
    }
}
