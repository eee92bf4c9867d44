//! Changeset directory store
//!
//! One file per pending changeset, named `<id>.<extension>`, plus the
//! processed-marker file. Listing order is lexicographic by file name.

use crate::config::ChangesetConfig;
use crate::errors::{io_error, record_exists, Result};
use crate::markers::MarkerFile;
use crate::record::{FrontMatterCodec, RecordCodec};
use changeset_core::model::ChangesetRecord;
use changeset_core_types::ChangesetId;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Which records `list` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Every record in the directory
    #[default]
    All,
    /// Records not yet in the processed-marker set
    StagedOnly,
}

/// Sorted, duplicate-free record ids from one directory scan
///
/// Can be iterated any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangesetListing {
    ids: Vec<ChangesetId>,
}

impl ChangesetListing {
    fn from_unsorted(mut ids: Vec<ChangesetId>) -> Self {
        ids.sort();
        ids.dedup();
        Self { ids }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangesetId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[ChangesetId] {
        &self.ids
    }
}

impl<'a> IntoIterator for &'a ChangesetListing {
    type Item = &'a ChangesetId;
    type IntoIter = std::slice::Iter<'a, ChangesetId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl IntoIterator for ChangesetListing {
    type Item = ChangesetId;
    type IntoIter = std::vec::IntoIter<ChangesetId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

/// Filesystem-backed changeset store
#[derive(Debug, Clone)]
pub struct ChangesetStore<C = FrontMatterCodec> {
    dir: PathBuf,
    extension: String,
    markers: MarkerFile,
    codec: C,
}

impl ChangesetStore<FrontMatterCodec> {
    /// Create a store over the configured changeset directory
    ///
    /// The directory is not touched until the first operation.
    pub fn new(config: &ChangesetConfig) -> Self {
        Self::with_codec(config, FrontMatterCodec)
    }
}

impl<C: RecordCodec> ChangesetStore<C> {
    pub fn with_codec(config: &ChangesetConfig, codec: C) -> Self {
        Self {
            dir: config.changeset_dir.clone(),
            extension: config.record_extension.clone(),
            markers: MarkerFile::new(config.marker_path()),
            codec,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name a record with this id is stored under
    pub fn file_name(&self, id: &ChangesetId) -> String {
        format!("{}.{}", id, self.extension)
    }

    pub fn record_path(&self, id: &ChangesetId) -> PathBuf {
        self.dir.join(self.file_name(id))
    }

    /// Create the changeset directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error("create_changeset_dir", &self.dir, e))
    }

    /// List record ids in file-name order
    ///
    /// `StagedOnly` drops ids present in the processed-marker set.
    pub fn list(&self, mode: ListMode) -> Result<ChangesetListing> {
        self.ensure_dir()?;

        let entries =
            fs::read_dir(&self.dir).map_err(|e| io_error("list_changesets", &self.dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list_changesets", &self.dir, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(|n| self.id_from_file_name(n)) {
                ids.push(id);
            }
        }

        if mode == ListMode::StagedOnly {
            let processed: HashSet<ChangesetId> =
                self.read_processed_markers()?.into_iter().collect();
            ids.retain(|id| !processed.contains(id));
        }

        let listing = ChangesetListing::from_unsorted(ids);

        tracing::debug!(
            dir = %self.dir.display(),
            mode = ?mode,
            candidate_count = listing.len(),
            "Listed changesets"
        );

        Ok(listing)
    }

    /// Read and decode one record
    pub fn read(&self, id: &ChangesetId) -> Result<ChangesetRecord> {
        let path = self.record_path(id);
        let text = fs::read_to_string(&path)
            .map_err(|e| io_error("read_record", &path, e).with_record_id(id.clone()))?;

        self.codec.decode(id, &text)
    }

    /// Encode and persist a new record
    ///
    /// Records are immutable: an existing id is rejected with `AlreadyExists`.
    pub fn write(&self, record: &ChangesetRecord) -> Result<PathBuf> {
        self.ensure_dir()?;

        let path = self.record_path(&record.id);
        if path.exists() {
            return Err(record_exists(&record.id, &path));
        }

        let text = self.codec.encode(record)?;
        crate::atomic::atomic_write(&path, text.as_bytes())?;

        tracing::debug!(
            changeset_id = %record.id,
            severity = %record.severity,
            path = %path.display(),
            "Wrote changeset"
        );

        Ok(path)
    }

    /// Remove a record; a missing file is not an error
    pub fn delete(&self, id: &ChangesetId) -> Result<()> {
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(changeset_id = %id, "Deleted changeset");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("delete_record", &path, e).with_record_id(id.clone())),
        }
    }

    /// Ids currently in the processed-marker set
    pub fn read_processed_markers(&self) -> Result<Vec<ChangesetId>> {
        Ok(self
            .markers
            .read()?
            .iter()
            .map(|name| self.id_from_marker(name))
            .collect())
    }

    /// Add ids to the processed-marker set
    pub fn append_processed_markers(&self, ids: &[ChangesetId]) -> Result<()> {
        self.markers
            .append(ids.iter().map(|id| self.file_name(id)))
    }

    /// Empty the processed-marker set
    pub fn clear_processed_markers(&self) -> Result<()> {
        self.markers.clear()
    }

    fn id_from_file_name(&self, name: &str) -> Option<ChangesetId> {
        let stem = name.strip_suffix(&self.extension)?.strip_suffix('.')?;
        if stem.is_empty() || stem.starts_with('.') {
            return None;
        }
        Some(ChangesetId::from(stem))
    }

    /// Markers are stored as file names; bare ids are accepted too
    fn id_from_marker(&self, name: &str) -> ChangesetId {
        self.id_from_file_name(name)
            .unwrap_or_else(|| ChangesetId::from(name))
    }
}
