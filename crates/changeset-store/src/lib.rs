//! Changeset Store - flat-file persistence for pending changesets
//!
//! Provides:
//! - Record codec (YAML front matter + Markdown body)
//! - Changeset directory store with processed-marker tracking
//! - Changelog file access with atomic rewrites
//! - Project descriptor lookup for the current version
//! - Configuration resolved once per invocation

pub mod atomic;
pub mod changelog_file;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod markers;
pub mod record;
pub mod store;

// Re-export key types
pub use changelog_file::ChangelogFile;
pub use config::ChangesetConfig;
pub use descriptor::{resolve_current_version, ManifestDescriptor, ProjectDescriptor};
pub use errors::Result;
pub use record::{FrontMatterCodec, RecordCodec};
pub use store::{ChangesetListing, ChangesetStore, ListMode};
