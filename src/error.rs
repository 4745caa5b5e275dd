use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while organizing a collection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read collection root {path}: {source}")]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to probe {path}: {message}")]
    Probe { path: PathBuf, message: String },

    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("encoded file {0} has no content")]
    ZeroByteOutput(PathBuf),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{existing} already exists and is not smaller than the new file")]
    DuplicateTrack { existing: PathBuf },

    #[error("cannot move folder to {desired}: {source}")]
    Collision {
        desired: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("files in {dir} resolved to different folders: {destinations:?}")]
    BundleInconsistency {
        dir: PathBuf,
        destinations: Vec<PathBuf>,
    },

    #[error("configuration: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Setup errors abort the whole run; everything else is scoped to a file or bundle.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidRoot { .. } | Self::NotADirectory(_) | Self::Config(_)
        )
    }

    /// Errors that only cancel the consolidation of one bundle.
    pub fn is_bundle_scoped(&self) -> bool {
        matches!(self, Self::Collision { .. } | Self::BundleInconsistency { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
