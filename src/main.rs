use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod consolidate;
mod error;
mod external;
mod library;
mod metadata;
mod runtime;
mod workqueue;

/// Organize audio recordings into `YYYY-MM-DD Album/DD-TT Title.mp3` folders
/// using file names, folder names and embedded tags.
#[derive(Parser, Debug)]
#[command(name = "audiocc")]
#[command(version)]
struct Args {
    /// Collection root
    #[arg(env = "AUDIOCC_ROOT", required_unless_present = "dump_config")]
    dir: Option<PathBuf>,

    /// Write changes to disk (default is a dry run)
    #[arg(long)]
    write: bool,

    /// Reprocess files whose tags already match
    #[arg(long)]
    force: bool,

    /// First folder is the artist; output is Artist/Year/Album
    #[arg(long)]
    collection: bool,

    /// Skip folders that already name a year and album
    #[arg(long)]
    fast: bool,

    /// Ask the encoder to repair damaged streams
    #[arg(long)]
    fix: bool,

    /// Force this artist on every file
    #[arg(long)]
    artist: Option<String>,

    /// Encoder quality, e.g. V0 or 320k
    #[arg(long)]
    bitrate: Option<String>,

    /// Worker threads per folder
    #[arg(long)]
    workers: Option<usize>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    /// Flags win over config and environment.
    fn apply(&self, settings: &mut config::Settings) {
        let organize = &mut settings.organize;
        organize.write |= self.write;
        organize.force |= self.force;
        organize.collection |= self.collection;
        organize.fast |= self.fast;
        organize.fix |= self.fix;
        if let Some(artist) = &self.artist {
            organize.artist = Some(artist.clone());
        }
        if let Some(bitrate) = &self.bitrate {
            organize.bitrate = bitrate.clone();
        }
        if let Some(workers) = self.workers {
            organize.workers = Some(workers.max(1));
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audiocc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut settings = runtime::load_settings();
    args.apply(&mut settings);

    if args.dump_config {
        return match settings.to_toml() {
            Ok(s) => {
                print!("{s}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to render settings");
                ExitCode::FAILURE
            }
        };
    }

    let Some(dir) = args.dir else {
        return ExitCode::FAILURE;
    };

    match runtime::run(&dir, &settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, fatal = e.is_fatal(), "run aborted");
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 when the collection could not be set up at all, 1 when a run stopped
/// part way through.
fn exit_status(err: &error::Error) -> u8 {
    if err.is_fatal() { 2 } else { 1 }
}
