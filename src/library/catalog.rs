use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{Error, Result};

/// Ensure `path` exists and is a directory.
pub fn check_dir(path: &Path) -> Result<PathBuf> {
    let meta = fs::metadata(path).map_err(|source| Error::InvalidRoot {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

fn normalized_exts(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// All files below `root` whose extension is in `exts`, relative to `root`
/// and sorted lexicographically.
pub fn files_by_extension(root: &Path, exts: &[String], settings: &LibrarySettings) -> Vec<PathBuf> {
    let exts = normalized_exts(exts);

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && has_extension(e.path(), &exts))
        .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();

    files.sort();
    files
}

/// Files directly inside `dir` (no recursion) whose extension is in `exts`, sorted.
pub fn files_in_dir(dir: &Path, exts: &[String]) -> Vec<PathBuf> {
    let exts = normalized_exts(exts);

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && has_extension(e.path(), &exts))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}
