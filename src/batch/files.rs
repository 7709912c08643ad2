use std::path::{Path, PathBuf};

use crate::error::StampError;

/// Files in a single directory selected by a file-name suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    /// Directory to scan (not recursive)
    pub dir: PathBuf,
    /// Required file-name suffix, e.g. `_ball.png`
    pub suffix: String,
}

impl FileSet {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    /// List matching regular files, sorted by file name.
    ///
    /// The listing is taken once; files created or removed afterwards are
    /// not observed by the caller's loop.
    pub fn collect(&self) -> Result<Vec<PathBuf>, StampError> {
        if !self.dir.exists() {
            return Err(StampError::InputNotFound(self.dir.clone()));
        }
        if !self.dir.is_dir() {
            return Err(StampError::DirectoryRead {
                path: self.dir.clone(),
                message: "not a directory".to_string(),
            });
        }

        let pattern = format!(
            "{}/*{}",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            glob::Pattern::escape(&self.suffix)
        );

        let entries = glob::glob(&pattern).map_err(|e| StampError::DirectoryRead {
            path: self.dir.clone(),
            message: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StampError::DirectoryRead {
                path: self.dir.clone(),
                message: e.to_string(),
            })?;
            if path.is_file() && self.matches(&path) {
                paths.push(path);
            }
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }

    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with(&self.suffix))
            .unwrap_or(false)
    }
}

/// File name for log lines, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
