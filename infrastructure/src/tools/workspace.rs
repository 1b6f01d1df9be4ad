//! Workspace path resolution shared by the file and document tools

use std::path::{Path, PathBuf};

/// Directory that relative tool paths resolve against
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path argument: absolute paths and `~/...` are used as
    /// given, anything else is joined onto the workspace root.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        if raw == "~" || raw.starts_with("~/") {
            return crate::config::expand_home(raw);
        }
        self.root.join(path)
    }

    /// Create the workspace directory if it does not exist yet.
    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}
