use changeset_core_types::ChangesetId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ChangesetError
pub type Result<T> = std::result::Result<T, ChangesetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and exit-status mapping in the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Nothing to apply. Benign: reported, never fatal.
    NoPendingChanges,
    /// A record (or the marker file) does not match the expected layout
    MalformedRecord,
    /// Filesystem-level failure on read, write or delete
    IoFailure,
    /// Conflicting flags or unparsable arguments
    InvalidUsage,

    // Validation
    InvalidInput,
    AlreadyExists,

    // Integration
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NoPendingChanges => "ERR_NO_PENDING_CHANGES",
            ExErrorKind::MalformedRecord => "ERR_MALFORMED_RECORD",
            ExErrorKind::IoFailure => "ERR_IO",
            ExErrorKind::InvalidUsage => "ERR_INVALID_USAGE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether this kind is an informational outcome rather than a failure
    pub fn is_benign(&self) -> bool {
        matches!(self, ExErrorKind::NoPendingChanges)
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the context
/// needed to act on it: which operation failed, which record, which path.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_id: Option<ChangesetId>,
    path: Option<PathBuf>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_id: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the offending record id
    pub fn with_record_id(mut self, id: impl Into<ChangesetId>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    /// Add the filesystem path involved
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the offending record id, if any
    pub fn record_id(&self) -> Option<&ChangesetId> {
        self.record_id.as_ref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, " (record: {})", record_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by the pure core (no filesystem involved)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChangesetError {
    /// Version text is not exactly three dot-separated non-negative integers
    #[error("Invalid version '{text}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion { text: String },

    /// Severity text is not one of patch, minor, major
    #[error("Invalid severity '{text}': expected patch, minor or major")]
    InvalidSeverity { text: String },

    /// Changeset message is empty or whitespace-only
    #[error("Changeset message cannot be empty")]
    EmptyMessage,

    /// Bumping would push a version component past `u64::MAX`
    #[error("Cannot apply a {severity} bump to version {version}: component overflow")]
    VersionOverflow { version: String, severity: String },

    /// Record text does not follow the header-plus-body layout
    #[error("Malformed changeset record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },
}

/// Conversion from ChangesetError to ExError
impl From<ChangesetError> for ExError {
    fn from(err: ChangesetError) -> Self {
        match err {
            ChangesetError::InvalidVersion { text } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_version")
                .with_message(format!("Invalid version '{}'", text)),

            ChangesetError::InvalidSeverity { text } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_severity")
                .with_message(format!("Invalid severity '{}'", text)),

            ChangesetError::EmptyMessage => ExError::new(ExErrorKind::InvalidInput)
                .with_message("Changeset message cannot be empty"),

            ChangesetError::VersionOverflow { version, severity } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("next_version")
                    .with_message(format!(
                        "Cannot apply a {} bump to version {}: component overflow",
                        severity, version
                    ))
            }

            ChangesetError::MalformedRecord { id, reason } => {
                ExError::new(ExErrorKind::MalformedRecord)
                    .with_record_id(ChangesetId::from_string(id))
                    .with_message(reason)
            }
        }
    }
}
