use std::path::{Path, PathBuf};

/// Group a sorted file list into runs sharing a parent directory.
///
/// `f` receives the indices of each run in order. The scan is a single pass
/// over `files` and relies on the sort order; it stops at the first error `f`
/// returns.
pub fn bundle<P, E, F>(files: &[P], mut f: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnMut(&[usize]) -> Result<(), E>,
{
    let mut run: Vec<usize> = Vec::new();
    let mut run_dir: Option<PathBuf> = None;

    for (i, file) in files.iter().enumerate() {
        let dir = parent_of(file.as_ref());
        match &run_dir {
            Some(current) if *current == dir => run.push(i),
            Some(_) => {
                f(&run)?;
                run.clear();
                run.push(i);
                run_dir = Some(dir);
            }
            None => {
                run.push(i);
                run_dir = Some(dir);
            }
        }
    }

    if !run.is_empty() {
        f(&run)?;
    }
    Ok(())
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
