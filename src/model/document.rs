//! Telos document model.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A markdown document in the Telos folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name, e.g. `my-telos.md`.
    pub file_name: String,
    /// File name without extension; outputs are keyed by this.
    pub stem: String,
}

impl Document {
    /// Build from a path. Returns `None` for paths without a file name.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let stem = path.file_stem()?.to_string_lossy().into_owned();
        Some(Self {
            path: path.to_path_buf(),
            file_name,
            stem,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let doc = Document::from_path(Path::new("telos/my-telos.md")).unwrap();
        assert_eq!(doc.file_name, "my-telos.md");
        assert_eq!(doc.stem, "my-telos");
        assert!(Document::from_path(Path::new("/")).is_none());
    }
}
