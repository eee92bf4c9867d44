//! Changeset Engine - command orchestration
//!
//! Wires the pure core and the flat-file store into the two user-facing
//! operations: recording a changeset and applying pending ones to the
//! changelog.

pub mod commands;

pub use commands::apply::{
    apply_changesets, apply_with, plan_apply, ApplyOptions, ApplyOutcome, ApplyPlan, ApplyReport,
    ApplyStage,
};
pub use commands::create::{create_changeset, CreateRequest, CreatedChangeset};
