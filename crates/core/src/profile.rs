//! Customer profile record.

use serde::{Deserialize, Serialize};

/// A customer's profile: a single record, overwritten wholesale on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Shipping address, free-form.
    #[serde(default)]
    pub address: String,
    /// Profile photo as a data URI, if one was uploaded.
    #[serde(default)]
    pub photo: Option<String>,
}

impl Profile {
    /// Whether a photo has been uploaded.
    #[must_use]
    pub const fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}
