use crate::errors::{ChangesetError, Result};
use crate::model::{ClassifiedChangeSet, Severity, Version};

/// Compute the version that follows `current` for a change of `severity`
///
/// Lower components are reset to zero on a major or minor bump.
///
/// # Errors
/// * `VersionOverflow` - The component to bump is already `u64::MAX`
pub fn next_version(current: Version, severity: Severity) -> Result<Version> {
    let overflow = || ChangesetError::VersionOverflow {
        version: current.to_string(),
        severity: severity.to_string(),
    };

    let next = match severity {
        Severity::Major => Version::new(
            current.major.checked_add(1).ok_or_else(overflow)?,
            0,
            0,
        ),
        Severity::Minor => Version::new(
            current.major,
            current.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        Severity::Patch => Version::new(
            current.major,
            current.minor,
            current.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };
    Ok(next)
}

/// How the entry version is chosen from the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionStrategy {
    /// Bump by the highest severity present
    #[default]
    Bump,
    /// Reuse the current version unchanged
    KeepCurrent,
}

/// Pick the version for a new changelog entry
///
/// With `Bump` and no changes at all, the current version is returned as-is.
///
/// # Errors
/// * `VersionOverflow` - Bumping would overflow a component
pub fn resolve_version(
    current: Version,
    changes: &ClassifiedChangeSet,
    strategy: VersionStrategy,
) -> Result<Version> {
    match (strategy, changes.highest_severity()) {
        (VersionStrategy::Bump, Some(severity)) => next_version(current, severity),
        _ => Ok(current),
    }
}
