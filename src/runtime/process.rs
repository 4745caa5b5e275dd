use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::TempDir;

use crate::consolidate::is_larger;
use crate::error::{Error, Result};
use crate::external::{COPY, EncodeMetadata, EncodeRequest};
use crate::library::PathInfo;
use crate::metadata::{Info, Reconciled};

use super::orchestrator::Orchestrator;

const FLAC_FOLDER_SUFFIX: &str = " - FLAC";

/// Container a file is written as: FLAC stays FLAC only inside a
/// `... - FLAC` folder, everything else becomes MP3.
pub(super) fn target_ext(pi: &PathInfo) -> &'static str {
    let keep_flac =
        pi.ext_lower() == ".flac" && pi.dir.to_string_lossy().ends_with(FLAC_FOLDER_SUFFIX);
    if keep_flac { ".flac" } else { ".mp3" }
}

/// Stream copy when the container does not change, otherwise the
/// configured quality.
pub(super) fn quality_for<'q>(pi: &PathInfo, target: &str, bitrate: &'q str) -> &'q str {
    if pi.ext_lower() == target { COPY } else { bitrate }
}

/// Scratch space for one bundle in write mode.
pub(super) struct Workspace {
    dir: TempDir,
    /// Held while a finished file is checked against and swapped into the
    /// bundle folder, so two workers never claim the same name.
    swap: Mutex<()>,
}

impl Workspace {
    pub(super) fn create(fulldir: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(".audiocc-")
            .tempdir_in(fulldir)
            .map_err(|e| Error::io(fulldir, e))?;
        Ok(Self {
            dir,
            swap: Mutex::new(()),
        })
    }

    pub(super) fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the scratch dir. It lives inside the bundle folder and must be
    /// gone before that folder is moved.
    pub(super) fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(err) = self.dir.close() {
            tracing::warn!(dir = %path.display(), error = %err, "failed to remove work dir");
        }
    }
}

impl Orchestrator<'_> {
    /// Metadata and destination for one file, relative to the root.
    pub(super) fn reconcile_file(&self, relative: &Path, pi: &PathInfo) -> Result<Reconciled> {
        let organize = &self.settings.organize;
        let mut segments = pi.segments();

        let mut overrides = Info::default();
        if let Some(artist) = organize.artist.as_deref().filter(|a| !a.trim().is_empty()) {
            overrides.artist = artist.trim().to_string();
        } else if organize.collection && !segments.is_empty() {
            overrides.artist = segments[0].clone();
        }
        if organize.collection && !segments.is_empty() {
            // The artist folder says nothing about the album.
            segments.remove(0);
        }

        let mut from_path = self.extractor.from_filename(&pi.file);
        self.extractor.apply_path(&mut from_path, &segments);

        let tags = self.tools.prober.probe(&pi.fullpath)?;
        let from_tags = self.extractor.from_tags(&tags);

        let (info, matched) =
            self.reconciler
                .reconcile(&overrides, &from_path, &from_tags, &tags.album);
        tracing::debug!(file = %pi.fullpath.display(), %info, matched, "reconciled");

        let result_path = if matched {
            relative.to_path_buf()
        } else {
            self.paths.destination(relative, &info, target_ext(pi))
        };

        Ok(Reconciled {
            info,
            matched,
            result_path,
        })
    }

    /// Process one file and return where it ends up once its folder has been
    /// moved. `workspace` is only set in write mode.
    pub(super) fn process_file(
        &self,
        relative: &Path,
        workspace: Option<&Workspace>,
        artwork: Option<&Path>,
    ) -> Result<PathBuf> {
        let pi = PathInfo::new(&self.root, relative);
        let rec = self.reconcile_file(relative, &pi)?;
        if rec.matched {
            return Ok(pi.fullpath);
        }

        let organize = &self.settings.organize;
        let target = target_ext(&pi);
        let quality = quality_for(&pi, target, &organize.bitrate);
        let destination = self.root.join(&rec.result_path);

        let mut report = format!("{}\n", pi.fullpath.display());
        let _ = writeln!(report, "  * update tags: {}", rec.info);
        if quality != COPY {
            let _ = writeln!(report, "  * convert to {} ({quality})", &target[1..].to_uppercase());
        }
        if destination != pi.fullpath {
            let _ = writeln!(report, "  * rename to: {}", destination.display());
        }

        if let Some(workspace) = workspace {
            let file_name = format!("{}{}", rec.info.to_file(), target);
            self.write_file(&pi, &rec.info, quality, workspace, &file_name, artwork)?;
        }

        print!("{report}");
        Ok(destination)
    }

    /// Encode into the workspace, then swap the result in for the source file.
    fn write_file(
        &self,
        pi: &PathInfo,
        info: &Info,
        quality: &str,
        workspace: &Workspace,
        file_name: &str,
        artwork: Option<&Path>,
    ) -> Result<()> {
        // Each file gets its own slot so two sources with the same target
        // name cannot overwrite each other's output.
        let workdir = workspace.path();
        let slot = tempfile::tempdir_in(workdir).map_err(|e| Error::io(workdir, e))?;
        let encoded = slot.path().join(file_name);
        let metadata = EncodeMetadata {
            artist: info.artist.clone(),
            album: info.to_album(),
            disc: info.disc.clone(),
            track: info.track.clone(),
            title: info.title.clone(),
            artwork: artwork.map(Path::to_path_buf),
        };
        let written = self.tools.encoder.encode(&EncodeRequest {
            source: &pi.fullpath,
            quality,
            dest: &encoded,
            metadata: &metadata,
            fix: self.settings.organize.fix,
        })?;

        let size = fs::metadata(&written)
            .map_err(|e| Error::io(&written, e))?
            .len();
        if size == 0 {
            return Err(Error::ZeroByteOutput(written));
        }

        let _swap = workspace.swap.lock().unwrap_or_else(PoisonError::into_inner);

        let final_path = pi.fulldir.join(file_name);
        let replaces_source = final_path == pi.fullpath;
        if !replaces_source && final_path.exists() {
            if !is_larger(&written, &final_path) {
                return Err(Error::DuplicateTrack {
                    existing: final_path,
                });
            }
            tracing::info!(existing = %final_path.display(), "replacing smaller duplicate");
        }

        // The source is only removed once its replacement is in place.
        fs::rename(&written, &final_path).map_err(|e| Error::io(&final_path, e))?;
        if !replaces_source {
            fs::remove_file(&pi.fullpath).map_err(|e| Error::io(&pi.fullpath, e))?;
        }
        Ok(())
    }
}
