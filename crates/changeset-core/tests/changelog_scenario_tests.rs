// Scenario tests for the pure pipeline stages: classify -> version -> render -> merge

use changeset_core::ops::{resolve_version, VersionStrategy};
use changeset_core::render::{merge_changelog, render_entry, Preamble};
use changeset_core::{ChangelogEntry, ChangesetId, ChangesetRecord, ClassifiedChangeSet, Severity, Version};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn record(id: &str, severity: Severity, message: &str) -> ChangesetRecord {
    ChangesetRecord::new(ChangesetId::from(id), severity, message, today(), None).unwrap()
}

#[test]
fn test_three_changesets_bump_minor() {
    // Given: two patches and one minor against 1.2.3
    let records = vec![
        record("01", Severity::Patch, "fix X"),
        record("02", Severity::Minor, "add Y"),
        record("03", Severity::Patch, "fix Z"),
    ];

    // When: we classify, version and render
    let changes = ClassifiedChangeSet::from_records(&records);
    let version = resolve_version(Version::new(1, 2, 3), &changes, VersionStrategy::Bump).unwrap();
    let fragment = render_entry(&ChangelogEntry {
        version,
        date: today(),
        changes,
    });

    // Then: the minor wins and the fragment has the expected lines only
    assert_eq!(version, Version::new(1, 3, 0));
    assert_eq!(fragment.matches("- ✨ minor:").count(), 1);
    assert_eq!(fragment.matches("- 🐛 patch:").count(), 2);
    assert!(!fragment.contains("Breaking Changes"));
    assert!(!fragment.contains("🚨"));
}

#[test]
fn test_successive_entries_stack_newest_first() {
    let preamble = Preamble::default();

    let mut first = ClassifiedChangeSet::new();
    first.push(Severity::Patch, "fix X");
    let doc = merge_changelog(
        None,
        &render_entry(&ChangelogEntry {
            version: Version::new(1, 0, 1),
            date: today(),
            changes: first,
        }),
        &preamble,
    );

    let mut second = ClassifiedChangeSet::new();
    second.push(Severity::Major, "drop W");
    let doc = merge_changelog(
        Some(&doc),
        &render_entry(&ChangelogEntry {
            version: Version::new(2, 0, 0),
            date: today(),
            changes: second,
        }),
        &preamble,
    );

    let newer = doc.find("## v2.0.0").unwrap();
    let older = doc.find("## v1.0.1").unwrap();
    assert!(doc.starts_with("# Changelog\n\n## v2.0.0"));
    assert!(newer < older);
    assert_eq!(doc.matches("# Changelog").count(), 1);
}
