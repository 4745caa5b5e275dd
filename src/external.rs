//! Collaborators that touch real audio: tag probing, encoding and cover art.
//! The organizer only talks to them through these traits.

mod artwork;
mod encoder;
mod prober;

pub use artwork::{ArtworkExtractor, FolderArtwork};
pub use encoder::{COPY, EncodeMetadata, EncodeRequest, Encoder, FfmpegEncoder};
pub use prober::{LoftyProber, Prober};
