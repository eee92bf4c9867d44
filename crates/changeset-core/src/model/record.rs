use crate::errors::{ChangesetError, Result};
use crate::model::Severity;
use changeset_core_types::ChangesetId;
use chrono::NaiveDate;

/// One pending change awaiting release
///
/// Immutable once written. The id is supplied by whoever names the storage
/// location; it is not part of the record's persisted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetRecord {
    pub id: ChangesetId,
    pub severity: Severity,
    pub message: String,
    pub created_at: NaiveDate,
    pub author: Option<String>,
}

impl ChangesetRecord {
    /// Create a record, trimming the message and rejecting an empty one
    ///
    /// # Errors
    /// * `EmptyMessage` - If the message is empty or whitespace-only
    pub fn new(
        id: ChangesetId,
        severity: Severity,
        message: impl AsRef<str>,
        created_at: NaiveDate,
        author: Option<String>,
    ) -> Result<Self> {
        let message = message.as_ref().trim();
        if message.is_empty() {
            return Err(ChangesetError::EmptyMessage);
        }

        Ok(Self {
            id,
            severity,
            message: message.to_string(),
            created_at,
            author: author
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        })
    }
}
