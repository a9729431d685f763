//! Profile metadata resolved from the identity directory.

use serde::Serialize;

use super::Fid;

/// Display name shown when a profile could not be resolved.
pub const PLACEHOLDER_NAME: &str = "N/A";

/// Display name and avatar for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRecord {
    /// User the record describes.
    pub fid: Fid,
    /// Profile name, or [`PLACEHOLDER_NAME`].
    pub display_name: String,
    /// Avatar image URL, when the profile has one.
    pub avatar_url: Option<String>,
}

impl IdentityRecord {
    /// Builds a record, substituting [`PLACEHOLDER_NAME`] for a missing or
    /// blank profile name and dropping a blank avatar URL.
    #[must_use]
    pub fn new(fid: Fid, display_name: Option<String>, avatar_url: Option<String>) -> Self {
        Self {
            fid,
            display_name: display_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            avatar_url: avatar_url.filter(|url| !url.trim().is_empty()),
        }
    }

    /// Record used when the directory has nothing for `fid`.
    #[must_use]
    pub fn placeholder(fid: Fid) -> Self {
        Self::new(fid, None, None)
    }
}
