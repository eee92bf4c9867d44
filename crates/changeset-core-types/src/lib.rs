//! Core types shared across changeset facilities
//!
//! This crate provides foundational types used by the core, the store and
//! the logging facility:
//!
//! - **Identifiers**: ChangesetId
//! - **Schema constants**: Canonical field keys and event names

pub mod id;
pub mod schema;

pub use id::ChangesetId;
