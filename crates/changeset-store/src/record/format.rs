//! Record header schema
//!
//! Defines the YAML structure between the `---` delimiters. Key names match
//! files written by earlier releases of the tool (`type`, `timestamp`).

use changeset_core::model::Severity;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Metadata block at the top of a changeset record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    /// Severity of the change
    #[serde(rename = "type")]
    pub severity: Severity,

    /// Creation date (`YYYY-MM-DD`; a full RFC 3339 timestamp is accepted)
    #[serde(deserialize_with = "deserialize_date")]
    pub timestamp: NaiveDate,

    /// Who recorded the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid timestamp '{}'", text)))
}
