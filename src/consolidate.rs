//! Moving a finished bundle folder to its final name without clobbering
//! anything already there, plus the size helpers used to pick between
//! duplicates.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// `desired` if it is free, otherwise the first free `desired (N)`.
pub fn free_name(desired: &Path) -> PathBuf {
    if !desired.exists() {
        return desired.to_path_buf();
    }
    (1..)
        .map(|n| {
            let mut name = OsString::from(desired.as_os_str());
            name.push(format!(" ({n})"));
            PathBuf::from(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| desired.to_path_buf())
}

/// Rename `source` to `desired`, or to `desired (1)`, `desired (2)`, ... when
/// that is taken. Never overwrites an existing directory. Missing parents of
/// the destination are created.
pub fn place(source: &Path, desired: &Path) -> Result<PathBuf> {
    let collision = |source: std::io::Error| Error::Collision {
        desired: desired.to_path_buf(),
        source,
    };

    if let Some(parent) = desired.parent() {
        fs::create_dir_all(parent).map_err(collision)?;
    }

    let target = free_name(desired);
    fs::rename(source, &target).map_err(collision)?;
    tracing::debug!(from = %source.display(), to = %target.display(), "placed folder");
    Ok(target)
}

/// Whether `a` is strictly larger than `b`. A missing `a` is never larger; a
/// missing `b` is always smaller.
pub fn is_larger(a: &Path, b: &Path) -> bool {
    let Ok(a) = fs::metadata(a) else {
        return false;
    };
    let Ok(b) = fs::metadata(b) else {
        return true;
    };
    a.len() > b.len()
}

/// Index and size of the smallest (or largest) file in `files`. Files that
/// cannot be stat'ed are ignored; ties go to the earliest index.
pub fn nth_file_size<P: AsRef<Path>>(files: &[P], smallest: bool) -> Option<(usize, u64)> {
    files
        .iter()
        .enumerate()
        .filter_map(|(i, f)| fs::metadata(f.as_ref()).ok().map(|m| (i, m.len())))
        .reduce(|best, cur| {
            let better = if smallest { cur.1 < best.1 } else { cur.1 > best.1 };
            if better { cur } else { best }
        })
}
