use std::path::PathBuf;

use crate::config::ArtworkSettings;
use crate::consolidate::nth_file_size;
use crate::error::Result;
use crate::library::{PathInfo, files_in_dir};

/// Finds cover art for a bundle. Called once per bundle, before any file in
/// it is processed.
pub trait ArtworkExtractor: Send + Sync {
    fn process(&self, pi: &PathInfo) -> Result<Option<PathBuf>>;
}

/// Uses the largest image lying next to the audio files.
#[derive(Debug, Clone)]
pub struct FolderArtwork {
    extensions: Vec<String>,
}

impl FolderArtwork {
    pub fn new(settings: &ArtworkSettings) -> Self {
        Self {
            extensions: settings.extensions.clone(),
        }
    }
}

impl ArtworkExtractor for FolderArtwork {
    fn process(&self, pi: &PathInfo) -> Result<Option<PathBuf>> {
        let images = files_in_dir(&pi.fulldir, &self.extensions);
        let Some((index, size)) = nth_file_size(&images, false) else {
            tracing::debug!(dir = %pi.fulldir.display(), "no artwork found");
            return Ok(None);
        };

        tracing::debug!(image = %images[index].display(), size, "using folder artwork");
        Ok(Some(images[index].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn picks_largest_image() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("back.jpg"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join("front.PNG"), vec![0u8; 30]).unwrap();
        fs::write(dir.path().join("track.mp3"), vec![0u8; 100]).unwrap();

        let pi = PathInfo::new(dir.path(), Path::new("track.mp3"));
        let art = FolderArtwork::new(&ArtworkSettings::default())
            .process(&pi)
            .unwrap();
        assert_eq!(art, Some(dir.path().join("front.PNG")));
    }

    #[test]
    fn no_images_is_not_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("track.mp3"), b"x").unwrap();

        let pi = PathInfo::new(dir.path(), Path::new("track.mp3"));
        let art = FolderArtwork::new(&ArtworkSettings::default())
            .process(&pi)
            .unwrap();
        assert_eq!(art, None);
    }
}
