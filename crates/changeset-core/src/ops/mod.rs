//! Pure operations over the domain model

pub mod bump;

pub use bump::{next_version, resolve_version, VersionStrategy};
