//! Domain models

pub mod changes;
pub mod record;
pub mod severity;
pub mod version;

pub use changes::{ChangelogEntry, ClassifiedChangeSet};
pub use record::ChangesetRecord;
pub use severity::Severity;
pub use version::Version;
