use crate::errors::{ChangesetError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity of a change; drives both changelog grouping and version bumps
///
/// Ordering follows bump precedence: `Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Bug fixes
    Patch,
    /// New features
    Minor,
    /// Breaking changes
    Major,
}

impl Severity {
    /// Order in which severities appear in a rendered changelog entry
    pub const DISPLAY_ORDER: [Severity; 3] = [Severity::Major, Severity::Minor, Severity::Patch];

    /// Lowercase name, as written in record headers
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Patch => "patch",
            Severity::Minor => "minor",
            Severity::Major => "major",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Patch => "🐛",
            Severity::Minor => "✨",
            Severity::Major => "🚨",
        }
    }

    /// Section title used in the changelog
    pub fn section_title(&self) -> &'static str {
        match self {
            Severity::Patch => "Bug Fixes",
            Severity::Minor => "Features",
            Severity::Major => "Breaking Changes",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ChangesetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patch" => Ok(Severity::Patch),
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            _ => Err(ChangesetError::InvalidSeverity {
                text: s.to_string(),
            }),
        }
    }
}
