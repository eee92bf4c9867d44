//! Record codec
//!
//! On-disk layout (the compatibility contract):
//!
//! ```text
//! ---
//! type: minor
//! timestamp: 2026-10-16
//! author: alice
//! ---
//!
//! add Y
//! ```
//!
//! The record id is the file stem and is never written into the file.

use crate::errors::{malformed_record, serialization_error, Result};
use crate::record::format::RecordHeader;
use changeset_core::model::ChangesetRecord;
use changeset_core_types::ChangesetId;

/// Line that opens and closes the header block
pub const HEADER_DELIMITER: &str = "---";

/// Serialization strategy for a single changeset record
pub trait RecordCodec {
    /// Encode a record to its persisted text
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the header cannot be encoded.
    fn encode(&self, record: &ChangesetRecord) -> Result<String>;

    /// Decode persisted text; `id` comes from the storage location
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` (carrying `id`) if the text does not follow
    /// the header-plus-body layout.
    fn decode(&self, id: &ChangesetId, text: &str) -> Result<ChangesetRecord>;
}

/// YAML front matter followed by a Markdown body
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontMatterCodec;

impl RecordCodec for FrontMatterCodec {
    fn encode(&self, record: &ChangesetRecord) -> Result<String> {
        let header = RecordHeader {
            severity: record.severity,
            timestamp: record.created_at,
            author: record.author.clone(),
        };

        let yaml = serde_yaml::to_string(&header)
            .map_err(|e| serialization_error("encode_record", e.to_string()))?;

        Ok(format!(
            "{delim}\n{yaml}{delim}\n\n{message}\n",
            delim = HEADER_DELIMITER,
            yaml = yaml,
            message = record.message
        ))
    }

    fn decode(&self, id: &ChangesetId, text: &str) -> Result<ChangesetRecord> {
        let (header_text, body) = split_front_matter(text)
            .ok_or_else(|| malformed_record(id, "missing '---' header delimiters"))?;

        let header: RecordHeader = serde_yaml::from_str(&header_text.replace("\r\n", "\n"))
            .map_err(|e| malformed_record(id, format!("invalid header: {}", e)))?;

        ChangesetRecord::new(
            id.clone(),
            header.severity,
            body,
            header.timestamp,
            header.author,
        )
        .map_err(|_| malformed_record(id, "empty message body"))
    }
}

/// Split `---\n<header>---\n<body>` into header and body
///
/// Delimiter lines may end in `\n` or `\r\n`. The body is returned
/// untouched.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(HEADER_DELIMITER)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter_line(line) {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn is_delimiter_line(line: &str) -> bool {
    match line.strip_suffix('\n') {
        Some(content) => content.strip_suffix('\r').unwrap_or(content) == HEADER_DELIMITER,
        None => false,
    }
}
