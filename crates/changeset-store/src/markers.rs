//! Processed-marker file
//!
//! A JSON array of record file names that a staged preview has already
//! shown. Missing file reads as the empty list.

use crate::atomic::atomic_write;
use crate::errors::{io_error, malformed_marker_file, serialization_error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct MarkerFile {
    path: PathBuf,
}

impl MarkerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the marked file names, in the order they were appended
    pub fn read(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("read_processed_markers", &self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| malformed_marker_file(&self.path, format!("invalid marker list: {}", e)))
    }

    /// Append names not already present; existing order is kept
    pub fn append<I, S>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut marked = self.read()?;
        let before = marked.len();

        for name in names {
            let name = name.into();
            if !marked.contains(&name) {
                marked.push(name);
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            added = marked.len() - before,
            total = marked.len(),
            "Appending processed markers"
        );

        self.write(&marked)
    }

    /// Remove the marker file; clearing an absent file is a no-op
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cleared processed markers");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("clear_processed_markers", &self.path, e)),
        }
    }

    fn write(&self, names: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(names)
            .map_err(|e| serialization_error("write_processed_markers", e.to_string()))?;
        atomic_write(&self.path, format!("{}\n", json).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use changeset_core::errors::ExErrorKind;
    use tempfile::TempDir;

    fn setup() -> (MarkerFile, TempDir) {
        let dir = TempDir::new().unwrap();
        let markers = MarkerFile::new(dir.path().join("save.json"));
        (markers, dir)
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let (markers, _dir) = setup();
        assert!(markers.read().unwrap().is_empty());
    }

    #[test]
    fn test_append_dedupes_and_keeps_order() {
        let (markers, _dir) = setup();

        markers.append(["b.md", "a.md"]).unwrap();
        markers.append(["a.md", "c.md"]).unwrap();

        assert_eq!(markers.read().unwrap(), vec!["b.md", "a.md", "c.md"]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (markers, _dir) = setup();
        markers.append(["a.md"]).unwrap();

        markers.clear().unwrap();
        markers.clear().unwrap();

        assert!(markers.read().unwrap().is_empty());
        assert!(!markers.path().exists());
    }

    #[test]
    fn test_garbage_is_malformed() {
        let (markers, _dir) = setup();
        fs::write(markers.path(), "{not json").unwrap();

        let err = markers.read().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::MalformedRecord);
        assert_eq!(err.path(), Some(markers.path()));
    }
}
