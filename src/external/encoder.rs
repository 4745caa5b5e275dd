use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Tags written into an encoded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeMetadata {
    pub artist: String,
    pub album: String,
    pub disc: String,
    pub track: String,
    pub title: String,
    pub artwork: Option<PathBuf>,
}

/// One encode job. `quality` is either an encoder quality such as `V0` or
/// `320k`, or `copy` to re-container the stream untouched.
#[derive(Debug, Clone)]
pub struct EncodeRequest<'a> {
    pub source: &'a Path,
    pub quality: &'a str,
    pub dest: &'a Path,
    pub metadata: &'a EncodeMetadata,
    pub fix: bool,
}

pub const COPY: &str = "copy";

/// Re-encodes or copies an audio stream into `dest` with new tags.
pub trait Encoder: Send + Sync {
    fn encode(&self, req: &EncodeRequest<'_>) -> Result<PathBuf>;
}

/// Encoder that shells out to ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: String,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

fn flags<const N: usize>(items: [&str; N]) -> [OsString; N] {
    items.map(OsString::from)
}

fn quality_args(quality: &str) -> Vec<OsString> {
    if quality == COPY {
        return flags(["-c:a", "copy"]).to_vec();
    }

    let mut args = flags(["-c:a", "libmp3lame"]).to_vec();
    // V0..V9 select LAME VBR presets; anything else is a bitrate
    match quality.strip_prefix(['V', 'v']) {
        Some(level) if !level.is_empty() && level.chars().all(|c| c.is_ascii_digit()) => {
            args.extend(flags(["-q:a", level]));
        }
        _ => args.extend(flags(["-b:a", quality])),
    }
    args
}

pub(crate) fn ffmpeg_args(req: &EncodeRequest<'_>) -> Vec<OsString> {
    let mut args = flags(["-hide_banner", "-loglevel", "error", "-nostdin", "-y"]).to_vec();

    if req.fix {
        args.extend(flags(["-err_detect", "ignore_err"]));
    }
    args.push(OsString::from("-i"));
    args.push(req.source.as_os_str().to_owned());

    match &req.metadata.artwork {
        Some(art) => {
            args.push(OsString::from("-i"));
            args.push(art.as_os_str().to_owned());
            args.extend(flags(["-map", "0:a", "-map", "1:0", "-c:v", "copy"]));
            args.extend(flags(["-disposition:v", "attached_pic"]));
        }
        None => args.extend(flags(["-map", "0:a"])),
    }

    args.extend(quality_args(req.quality));
    args.extend(flags(["-map_metadata", "-1"]));

    let m = req.metadata;
    for (key, value) in [
        ("artist", &m.artist),
        ("album", &m.album),
        ("disc", &m.disc),
        ("track", &m.track),
        ("title", &m.title),
    ] {
        if !value.is_empty() {
            args.push(OsString::from("-metadata"));
            args.push(OsString::from(format!("{key}={value}")));
        }
    }

    let is_mp3 = req
        .dest
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("mp3"));
    if is_mp3 {
        args.extend(flags(["-id3v2_version", "3"]));
    }

    args.push(req.dest.as_os_str().to_owned());
    args
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, req: &EncodeRequest<'_>) -> Result<PathBuf> {
        tracing::debug!(
            source = %req.source.display(),
            dest = %req.dest.display(),
            quality = req.quality,
            "running ffmpeg"
        );

        let output = Command::new(&self.program)
            .args(ffmpeg_args(req))
            .output()
            .map_err(|e| Error::Encode {
                path: req.source.to_path_buf(),
                message: format!("cannot run {}: {e}", self.program),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Encode {
                path: req.source.to_path_buf(),
                message: format!("exit code {:?}: {}", output.status.code(), stderr.trim()),
            });
        }

        Ok(req.dest.to_path_buf())
    }
}
