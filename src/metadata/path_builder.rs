use std::path::{Path, PathBuf};

use crate::config::OrganizeSettings;

use super::model::{Info, safe_filename};

/// Computes where a file belongs, relative to the collection root.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    collection: bool,
}

impl PathBuilder {
    pub fn new(settings: &OrganizeSettings) -> Self {
        Self {
            collection: settings.collection,
        }
    }

    /// Destination for the file currently at `relative`.
    ///
    /// `Album/File.ext` by default, `Artist/Year/Album/File.ext` in
    /// collection mode or when the file already sits under matching artist and
    /// year folders. When no album can be named the file keeps its folder.
    pub fn destination(&self, relative: &Path, info: &Info, ext: &str) -> PathBuf {
        let folders: Vec<String> = relative
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        let mut dest = PathBuf::new();

        let under_artist_year = folders.len() > 1
            && !info.artist.is_empty()
            && folders[0] == info.artist
            && folders[1] == info.year;
        if self.collection || under_artist_year {
            for part in [&info.artist, &info.year] {
                let part = safe_filename(part);
                if !part.is_empty() {
                    dest.push(part);
                }
            }
        }

        let album = safe_filename(&info.to_album());
        if !album.is_empty() {
            dest.push(album);
        } else if let Some(current) = folders.last() {
            dest.push(current);
        }

        dest.push(format!("{}{}", info.to_file(), ext));
        dest
    }
}
