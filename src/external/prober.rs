use std::path::Path;

use lofty::prelude::*;

use crate::error::{Error, Result};
use crate::metadata::EmbeddedTags;

/// Reads the tags embedded in an audio file.
pub trait Prober: Send + Sync {
    fn probe(&self, path: &Path) -> Result<EmbeddedTags>;
}

/// Tag reader backed by `lofty`. Files without any tag probe as empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProber;

impl Prober for LoftyProber {
    fn probe(&self, path: &Path) -> Result<EmbeddedTags> {
        let tagged = lofty::read_from_path(path).map_err(|e| Error::Probe {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Ok(EmbeddedTags::default());
        };

        let text = |v: Option<std::borrow::Cow<'_, str>>| {
            v.map(|s| s.trim().to_string()).unwrap_or_default()
        };

        Ok(EmbeddedTags {
            album: text(tag.album()),
            artist: text(tag.artist()),
            title: text(tag.title()),
            disc: tag.disk(),
            track: tag.track(),
        })
    }
}
