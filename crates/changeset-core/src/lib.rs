//! Changeset Core - pure domain kernel for changelog generation
//!
//! This crate provides the foundational data structures and operations:
//! - Changeset records, severities and semantic versions
//! - Classification of records into severity buckets
//! - Version bump calculation
//! - Changelog entry rendering and document merging
//! - Error and logging facilities shared by the store and engine
//!
//! Nothing here touches the filesystem; persistence lives in `changeset-store`.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod render;

// Re-export commonly used types
pub use changeset_core_types::ChangesetId;
pub use errors::{ChangesetError, ExError, ExErrorKind, Result};
pub use model::{ChangelogEntry, ChangesetRecord, ClassifiedChangeSet, Severity, Version};
pub use ops::next_version;
