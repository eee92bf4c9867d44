use crate::model::{ChangesetRecord, Severity, Version};
use chrono::NaiveDate;

/// Messages bucketed by severity for one apply run
///
/// Within a bucket, messages keep the order in which they were pushed, which
/// is record discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedChangeSet {
    major: Vec<String>,
    minor: Vec<String>,
    patch: Vec<String>,
}

impl ClassifiedChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket every record by its severity, preserving iteration order
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ChangesetRecord>) -> Self {
        let mut changes = Self::new();
        for record in records {
            changes.push(record.severity, record.message.clone());
        }
        changes
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.bucket_mut(severity).push(message.into());
    }

    /// Messages recorded under one severity
    pub fn bucket(&self, severity: Severity) -> &[String] {
        match severity {
            Severity::Major => &self.major,
            Severity::Minor => &self.minor,
            Severity::Patch => &self.patch,
        }
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<String> {
        match severity {
            Severity::Major => &mut self.major,
            Severity::Minor => &mut self.minor,
            Severity::Patch => &mut self.patch,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.bucket(severity).len()
    }

    /// Total number of messages across all buckets
    pub fn len(&self) -> usize {
        self.major.len() + self.minor.len() + self.patch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest severity with at least one member (major > minor > patch)
    pub fn highest_severity(&self) -> Option<Severity> {
        Severity::DISPLAY_ORDER
            .into_iter()
            .find(|severity| !self.bucket(*severity).is_empty())
    }
}

/// Rendering input for one changelog entry; never persisted on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub version: Version,
    pub date: NaiveDate,
    pub changes: ClassifiedChangeSet,
}
