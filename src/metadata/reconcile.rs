use std::path::PathBuf;

use crate::config::{InfoSource, OrganizeSettings};

use super::model::Info;

/// Final metadata for one file and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub info: Info,
    /// Names and tags already agree; nothing to rewrite.
    pub matched: bool,
    /// Destination relative to the collection root. Equals the current
    /// relative path when `matched`.
    pub result_path: PathBuf,
}

/// Merges what the path says with what the tags say.
#[derive(Debug, Clone)]
pub struct TagReconciler {
    prefer: InfoSource,
    force: bool,
}

impl TagReconciler {
    pub fn new(settings: &OrganizeSettings) -> Self {
        Self {
            prefer: settings.prefer,
            force: settings.force,
        }
    }

    /// Merge `from_path` and `from_tags`, then apply `overrides`.
    ///
    /// The preferred source is kept as is where it has a value; the other one
    /// only fills gaps. A non-empty override artist replaces both. The result
    /// matches when its album string is non-empty and equals `tag_album`
    /// exactly, which is never the case under `force`.
    pub fn reconcile(
        &self,
        overrides: &Info,
        from_path: &Info,
        from_tags: &Info,
        tag_album: &str,
    ) -> (Info, bool) {
        let (primary, secondary) = match self.prefer {
            InfoSource::Path => (from_path, from_tags),
            InfoSource::Tags => (from_tags, from_path),
        };

        let mut merged = primary.clone();
        merged.fill_from(secondary);

        if !overrides.artist.is_empty() {
            merged.artist = overrides.artist.clone();
        }

        // Nothing to compare against when neither side names an album.
        let album = merged.to_album();
        let matched = !self.force && !album.is_empty() && album == tag_album;
        (merged, matched)
    }
}
