//! Changelog document access
//!
//! Read in full, rewritten in full. Absence is reported as `None`, which is
//! distinct from an empty but present document.

use crate::atomic::atomic_write;
use crate::errors::{io_error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ChangelogFile {
    path: PathBuf,
}

impl ChangelogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document; `Ok(None)` when the file does not exist
    pub fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read_changelog", &self.path, e)),
        }
    }

    /// Replace the whole document atomically
    pub fn write(&self, content: &str) -> Result<()> {
        atomic_write(&self.path, content.as_bytes())?;

        tracing::debug!(
            path = %self.path.display(),
            size_bytes = content.len(),
            "Wrote changelog"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_vs_empty() {
        let dir = TempDir::new().unwrap();
        let changelog = ChangelogFile::new(dir.path().join("CHANGELOG.md"));

        assert_eq!(changelog.read().unwrap(), None);

        fs::write(changelog.path(), "").unwrap();
        assert_eq!(changelog.read().unwrap(), Some(String::new()));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let changelog = ChangelogFile::new(dir.path().join("CHANGELOG.md"));

        changelog.write("# Changelog\n").unwrap();

        assert_eq!(changelog.read().unwrap().as_deref(), Some("# Changelog\n"));
    }
}
