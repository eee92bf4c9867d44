//! Changeset record serialization
//!
//! Provides:
//! - Front-matter header schema
//! - The `RecordCodec` seam and its single front-matter implementation

pub mod codec;
pub mod format;

pub use codec::{FrontMatterCodec, RecordCodec, HEADER_DELIMITER};
pub use format::RecordHeader;
