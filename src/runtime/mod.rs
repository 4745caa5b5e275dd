use std::path::Path;

use crate::config::Settings;
use crate::error::Result;
use crate::external::{FfmpegEncoder, FolderArtwork, LoftyProber};

mod orchestrator;
mod process;
mod settings;

pub use orchestrator::{Collaborators, Orchestrator, RunSummary};
pub use settings::load_settings;


/// Organize the collection at `root` with the real tag reader, encoder and
/// folder artwork.
pub fn run(root: &Path, settings: &Settings) -> Result<RunSummary> {
    if !settings.organize.write {
        println!("\n* To write changes to disk, please provide flag: --write");
    }

    let prober = LoftyProber;
    let encoder = FfmpegEncoder::new(settings.encoder.ffmpeg.clone());
    let artwork = FolderArtwork::new(&settings.artwork);
    let tools = Collaborators {
        prober: &prober,
        encoder: &encoder,
        artwork: &artwork,
    };

    let summary = Orchestrator::new(root, settings, tools).run()?;
    tracing::info!(%summary, "run complete");
    println!("\naudiocc finished.");
    Ok(summary)
}
