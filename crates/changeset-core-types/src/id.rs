//! Changeset identifiers
//!
//! A changeset id names exactly one record file in the changeset directory.
//! The id is the file stem; it is never written inside the record itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single pending changeset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangesetId(String);

impl ChangesetId {
    /// Generate a fresh id: a random UUIDv4 rendered as 32 lowercase hex chars
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. a file stem)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Consume the id and return the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ChangesetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChangesetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
