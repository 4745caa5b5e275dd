use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::consolidate::place;
use crate::error::Result;
use crate::external::{ArtworkExtractor, Encoder, Prober};
use crate::library::{PathInfo, bundle, check_dir, files_by_extension};
use crate::metadata::{Info, InfoExtractor, PathBuilder, TagReconciler};
use crate::workqueue::{BundleReport, WorkQueue};

use super::process::Workspace;

/// Totals for one run over a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub bundles: usize,
    pub skipped: usize,
    pub files_ok: usize,
    pub files_failed: usize,
    pub moved: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} folders ({} skipped), {} files ok, {} failed, {} folders moved",
            self.bundles, self.skipped, self.files_ok, self.files_failed, self.moved
        )
    }
}

/// The external tools an orchestrator drives.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub prober: &'a dyn Prober,
    pub encoder: &'a dyn Encoder,
    pub artwork: &'a dyn ArtworkExtractor,
}

/// Walks a collection one folder at a time and organizes each.
pub struct Orchestrator<'a> {
    pub(super) root: PathBuf,
    pub(super) settings: &'a Settings,
    pub(super) tools: Collaborators<'a>,
    pub(super) extractor: InfoExtractor,
    pub(super) reconciler: TagReconciler,
    pub(super) paths: PathBuilder,
    queue: WorkQueue,
}

impl<'a> Orchestrator<'a> {
    pub fn new(root: impl Into<PathBuf>, settings: &'a Settings, tools: Collaborators<'a>) -> Self {
        Self::with_extractor(root, settings, tools, InfoExtractor::new())
    }

    pub fn with_extractor(
        root: impl Into<PathBuf>,
        settings: &'a Settings,
        tools: Collaborators<'a>,
        extractor: InfoExtractor,
    ) -> Self {
        let organize = &settings.organize;
        Self {
            root: root.into(),
            settings,
            tools,
            extractor,
            reconciler: TagReconciler::new(organize),
            paths: PathBuilder::new(organize),
            queue: WorkQueue::new(organize.worker_count()),
        }
    }

    /// Organize every bundle below the root. Only setup failures and errors
    /// outside a single file or folder move end the run early.
    pub fn run(&self) -> Result<RunSummary> {
        let root = check_dir(&self.root)?;
        let library = &self.settings.library;
        let files = files_by_extension(&root, &library.extensions, library);
        tracing::info!(
            root = %root.display(),
            files = files.len(),
            workers = self.queue.workers(),
            "scanned collection"
        );

        let mut summary = RunSummary::default();
        bundle(&files, |indices| {
            match self.process_bundle(&files, indices, &mut summary) {
                Err(err) if err.is_bundle_scoped() => {
                    tracing::error!(error = %err, "folder left in place");
                    Ok(())
                }
                other => other,
            }
        })?;

        Ok(summary)
    }

    /// Why a bundle needs no work, if it doesn't.
    pub(super) fn skip_reason(&self, pi: &PathInfo) -> Option<&'static str> {
        let segments = pi.segments();
        let organize = &self.settings.organize;

        if organize.collection && segments.first().is_some_and(|s| s.contains(" - ")) {
            return Some("artist folder contains \" - \"");
        }

        if organize.fast {
            if let Some(innermost) = segments.last() {
                let mut info = Info::default();
                self.extractor.apply_segment(&mut info, innermost);
                if !info.year.is_empty() && !info.album.is_empty() {
                    return Some("folder already names year and album");
                }
            }
        }

        None
    }

    fn process_bundle(
        &self,
        files: &[PathBuf],
        indices: &[usize],
        summary: &mut RunSummary,
    ) -> Result<()> {
        let Some(&first) = indices.first() else {
            return Ok(());
        };
        let pi = PathInfo::new(&self.root, &files[first]);
        summary.bundles += 1;

        println!("\nProcessing: {} ...", pi.fulldir.display());

        if let Some(reason) = self.skip_reason(&pi) {
            tracing::info!(dir = %pi.dir.display(), reason, "skipping folder");
            summary.skipped += 1;
            return Ok(());
        }

        let write = self.settings.organize.write;
        let artwork = if write {
            self.tools.artwork.process(&pi)?
        } else {
            None
        };

        let workspace = if write {
            Some(Workspace::create(&pi.fulldir)?)
        } else {
            None
        };

        let results = self.queue.run(indices, |i| {
            self.process_file(&files[i], workspace.as_ref(), artwork.as_deref())
        });

        if let Some(workspace) = workspace {
            workspace.close();
        }

        let report = BundleReport::new(&pi.fulldir, results);
        summary.files_ok += report.destinations.len();
        summary.files_failed += report.failures.len();

        let Some(dest) = report.destination_dir()? else {
            return Ok(());
        };
        if dest == pi.fulldir {
            return Ok(());
        }
        self.consolidate(&pi.fulldir, &dest, summary)
    }

    fn consolidate(&self, source: &Path, dest: &Path, summary: &mut RunSummary) -> Result<()> {
        if source == self.root {
            tracing::warn!(
                dest = %dest.display(),
                "files sit directly in the collection root; folder not moved"
            );
            return Ok(());
        }

        if !self.settings.organize.write {
            println!("  * move folder to: {}", dest.display());
            return Ok(());
        }

        let placed = place(source, dest)?;
        summary.moved += 1;
        println!("  * moved folder to: {}", placed.display());
        Ok(())
    }
}
