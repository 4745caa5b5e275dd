use std::path::{Path, PathBuf};

/// Where a file lives, split the ways the organizer needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    /// Root joined with the relative file path.
    pub fullpath: PathBuf,
    /// Directory portion of `fullpath`.
    pub fulldir: PathBuf,
    /// Directory relative to the root. For files sitting directly in the
    /// root this is the root's own folder name.
    pub dir: PathBuf,
    /// File name without extension.
    pub file: String,
    /// Extension including the leading dot, or empty.
    pub ext: String,
}

impl PathInfo {
    pub fn new(root: &Path, relative: &Path) -> Self {
        let fullpath = root.join(relative);
        let fulldir = fullpath.parent().map(Path::to_path_buf).unwrap_or_default();

        let dir = match relative.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => root.file_name().map(PathBuf::from).unwrap_or_default(),
        };

        let file = relative
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = relative
            .extension()
            .map(|s| format!(".{}", s.to_string_lossy()))
            .unwrap_or_default();

        Self {
            fullpath,
            fulldir,
            dir,
            file,
            ext,
        }
    }

    /// Folder names of `dir`, outermost first.
    pub fn segments(&self) -> Vec<String> {
        self.dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .filter(|s| !s.is_empty() && s != ".")
            .collect()
    }

    /// Lowercased extension, for format comparisons.
    pub fn ext_lower(&self) -> String {
        self.ext.to_ascii_lowercase()
    }
}
