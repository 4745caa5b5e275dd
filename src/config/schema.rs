use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/audiocc/config.toml` or `~/.config/audiocc/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `AUDIOCC__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub organize: OrganizeSettings,
    pub library: LibrarySettings,
    pub artwork: ArtworkSettings,
    pub encoder: EncoderSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrganizeSettings {
    /// Apply changes to disk. When false, only print what would change.
    pub write: bool,
    /// Reprocess files even when their tags already match the path.
    pub force: bool,
    /// Treat the first folder under the root as the artist.
    /// Destinations become `Artist/Year/Album`.
    pub collection: bool,
    /// Skip folders whose name already carries a year and an album.
    pub fast: bool,
    /// Force this artist on every file.
    pub artist: Option<String>,
    /// Encoder quality used when a file has to be converted.
    pub bitrate: String,
    /// Ask the encoder to repair damaged streams.
    pub fix: bool,
    /// Worker threads per folder. Defaults to the number of CPUs.
    pub workers: Option<usize>,
    /// Which source wins when path and tags disagree.
    pub prefer: InfoSource,
}

impl Default for OrganizeSettings {
    fn default() -> Self {
        Self {
            write: false,
            force: false,
            collection: false,
            fast: false,
            artist: None,
            bitrate: "V0".to_string(),
            fix: false,
            workers: None,
            prefer: InfoSource::Path,
        }
    }
}

impl OrganizeSettings {
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InfoSource {
    /// File and folder names win; tags only fill gaps.
    #[serde(alias = "filename", alias = "folder")]
    Path,
    /// Embedded tags win; names only fill gaps.
    #[serde(alias = "tag", alias = "embedded")]
    Tags,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["flac", "m4a", "mp3", "mp4", "shn", "wav"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// Image extensions considered as folder artwork.
    pub extensions: Vec<String>,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EncoderSettings {
    /// ffmpeg executable, either a name on `PATH` or an absolute path.
    pub ffmpeg: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}
