//! Engine commands

pub mod apply;
pub mod create;
