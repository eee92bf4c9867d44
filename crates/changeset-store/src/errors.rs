//! Error handling for changeset-store
//!
//! Wraps changeset-core ExError with store-specific helpers

use changeset_core::errors::{ChangesetError, ExError, ExErrorKind};
use changeset_core_types::ChangesetId;
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error carrying the path and the underlying cause
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::IoFailure)
        .with_op(operation)
        .with_path(path)
        .with_message(err.to_string())
}

/// Create a malformed record error
pub fn malformed_record(id: &ChangesetId, reason: impl Into<String>) -> ExError {
    ExError::from(ChangesetError::MalformedRecord {
        id: id.to_string(),
        reason: reason.into(),
    })
    .with_op("decode_record")
}

/// Create a malformed marker file error
pub fn malformed_marker_file(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::MalformedRecord)
        .with_op("read_processed_markers")
        .with_path(path)
        .with_message(reason)
}

/// Create an error for writing over an existing record
pub fn record_exists(id: &ChangesetId, path: &Path) -> ExError {
    ExError::new(ExErrorKind::AlreadyExists)
        .with_op("write_record")
        .with_record_id(id.clone())
        .with_path(path)
        .with_message("Changeset record already exists")
}

/// Create a serialization error
pub fn serialization_error(operation: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation)
        .with_message(reason)
}

/// Create an invalid configuration error
pub fn invalid_config(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_config")
        .with_path(path)
        .with_message(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_carries_id_and_op() {
        let err = malformed_record(&ChangesetId::from("abc"), "missing header");

        assert_eq!(err.kind(), ExErrorKind::MalformedRecord);
        assert_eq!(err.op(), Some("decode_record"));
        assert_eq!(err.record_id().map(|id| id.as_str()), Some("abc"));
        assert_eq!(err.message(), "missing header");
    }
}
