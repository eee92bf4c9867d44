//! Apply pipeline: fold pending changesets into the changelog.
//!
//! ## Stages (in order):
//! 1. Idle → Loaded: enumerate candidate ids (all, or not yet staged)
//! 2. Loaded → Classified: read every record, drop those before the
//!    from-date, bucket the rest by severity
//! 3. Classified → Versioned: keep or bump the current version
//! 4. Versioned → Rendered → Merged: render the fragment and splice it into
//!    the changelog text (no writes yet)
//! 5. Committed: write changelog, delete consumed records, clear markers;
//!    or Previewed: no writes, except the marker append when staging
//!
//! The commit sequence is not transactional. A crash after the changelog
//! write can leave consumed records on disk; a rerun then counts them again
//! against the new current version. Nothing serializes concurrent runs
//! against the same directory.

use changeset_core::errors::{ExError, ExErrorKind};
use changeset_core::model::{ChangelogEntry, ClassifiedChangeSet, Version};
use changeset_core::ops::{resolve_version, VersionStrategy};
use changeset_core::render::{merge_changelog, render_entry, Preamble};
use changeset_core_types::ChangesetId;
use changeset_store::errors::Result;
use changeset_store::{
    resolve_current_version, ChangelogFile, ChangesetConfig, ChangesetStore, ListMode,
    ManifestDescriptor, ProjectDescriptor, RecordCodec,
};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::time::Instant;

/// Per-run switches for `apply`
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Preview only: the changelog and the records are left untouched
    pub dry_run: bool,
    /// Reuse the current version instead of bumping it
    pub keep_current_version: bool,
    /// Only with `dry_run`: consider unmarked records only, then mark them
    pub stage: bool,
    /// Records created before this date are skipped and stay pending
    pub from_date: Option<NaiveDate>,
    /// Entry date; today (local time) when `None`
    pub date: Option<NaiveDate>,
}

impl ApplyOptions {
    /// Reject flag combinations before anything touches the filesystem
    ///
    /// # Errors
    /// * `InvalidUsage` - `stage` without `dry_run`
    pub fn validate(&self) -> Result<()> {
        if self.stage && !self.dry_run {
            return Err(ExError::new(ExErrorKind::InvalidUsage)
                .with_op("apply")
                .with_message("staging can only be used together with dry-run"));
        }
        Ok(())
    }

    fn list_mode(&self) -> ListMode {
        if self.stage {
            ListMode::StagedOnly
        } else {
            ListMode::All
        }
    }

    fn version_strategy(&self) -> VersionStrategy {
        if self.keep_current_version {
            VersionStrategy::KeepCurrent
        } else {
            VersionStrategy::Bump
        }
    }
}

/// Pipeline states, logged at `debug` as the run advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStage {
    Idle,
    Loaded,
    Classified,
    Versioned,
    Rendered,
    Merged,
    Committed,
    Previewed,
}

/// Everything an apply run would write, computed without side effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyPlan {
    /// Records folded into this entry, in discovery order
    pub consumed: Vec<ChangesetId>,
    /// Records left pending by the from-date filter
    pub skipped: Vec<ChangesetId>,
    /// Version reported by the project descriptor (or the default)
    pub previous_version: Version,
    pub entry: ChangelogEntry,
    /// Rendered entry alone
    pub fragment: String,
    /// Full changelog text after the merge
    pub document: String,
}

impl ApplyPlan {
    pub fn version(&self) -> Version {
        self.entry.version
    }

    pub fn changes(&self) -> &ClassifiedChangeSet {
        &self.entry.changes
    }
}

/// Which terminal branch a run took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Committed,
    Previewed { staged: bool },
}

impl ApplyOutcome {
    pub fn stage(&self) -> ApplyStage {
        match self {
            ApplyOutcome::Committed => ApplyStage::Committed,
            ApplyOutcome::Previewed { .. } => ApplyStage::Previewed,
        }
    }
}

/// Result of a successful apply run
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub outcome: ApplyOutcome,
    pub plan: ApplyPlan,
    pub changelog_path: PathBuf,
}

fn enter(stage: ApplyStage) {
    tracing::debug!(stage = ?stage, "Apply pipeline stage");
}

fn no_pending_changes(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::NoPendingChanges)
        .with_op("apply")
        .with_message(message)
}

/// Run the read-only stages: Idle through Merged
///
/// # Errors
/// * `NoPendingChanges` - No candidates, or none left after the from-date filter
/// * `MalformedRecord` - Any candidate fails to decode (the whole run aborts)
/// * `InvalidInput` - Bumping the current version would overflow a component
/// * `IoFailure` - A record or the changelog cannot be read
pub fn plan_apply<C: RecordCodec>(
    store: &ChangesetStore<C>,
    changelog: &ChangelogFile,
    descriptor: &dyn ProjectDescriptor,
    preamble: &Preamble,
    options: &ApplyOptions,
) -> Result<ApplyPlan> {
    enter(ApplyStage::Idle);

    let candidates = store.list(options.list_mode())?;
    if candidates.is_empty() {
        return Err(no_pending_changes("No changeset files found"));
    }
    enter(ApplyStage::Loaded);

    let records = candidates
        .iter()
        .map(|id| store.read(id))
        .collect::<Result<Vec<_>>>()?;

    let (records, skipped): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| options.from_date.map_or(true, |from| r.created_at >= from));

    if records.is_empty() {
        return Err(match options.from_date {
            Some(from) => no_pending_changes(format!(
                "No changesets created on or after {}",
                from.format("%Y-%m-%d")
            )),
            None => no_pending_changes("No changeset files found"),
        });
    }

    let changes = ClassifiedChangeSet::from_records(&records);
    enter(ApplyStage::Classified);

    let previous_version = resolve_current_version(descriptor);
    let version = resolve_version(previous_version, &changes, options.version_strategy())?;
    enter(ApplyStage::Versioned);

    let entry = ChangelogEntry {
        version,
        date: options.date.unwrap_or_else(|| Local::now().date_naive()),
        changes,
    };
    let fragment = render_entry(&entry);
    enter(ApplyStage::Rendered);

    let existing = changelog.read()?;
    let document = merge_changelog(existing.as_deref(), &fragment, preamble);
    enter(ApplyStage::Merged);

    Ok(ApplyPlan {
        consumed: records.into_iter().map(|r| r.id).collect(),
        skipped: skipped.into_iter().map(|r| r.id).collect(),
        previous_version,
        entry,
        fragment,
        document,
    })
}

/// Plan, then commit or preview
///
/// # Errors
/// * `InvalidUsage` - Rejected options; nothing has been read or written
/// * Any error from [`plan_apply`]
/// * `IoFailure` - A commit or staging write fails part-way
pub fn apply_with<C: RecordCodec>(
    store: &ChangesetStore<C>,
    changelog: &ChangelogFile,
    descriptor: &dyn ProjectDescriptor,
    preamble: &Preamble,
    options: &ApplyOptions,
) -> Result<ApplyReport> {
    options.validate()?;

    let plan = plan_apply(store, changelog, descriptor, preamble, options)?;

    let outcome = if options.dry_run {
        if options.stage {
            store.append_processed_markers(&plan.consumed)?;
        }
        ApplyOutcome::Previewed {
            staged: options.stage,
        }
    } else {
        changelog.write(&plan.document)?;
        for id in &plan.consumed {
            store.delete(id)?;
        }
        store.clear_processed_markers()?;
        ApplyOutcome::Committed
    };
    enter(outcome.stage());

    Ok(ApplyReport {
        outcome,
        plan,
        changelog_path: changelog.path().to_path_buf(),
    })
}

/// Apply pending changesets for the configured project
///
/// Resolves the store, the changelog file and the project descriptor from
/// `config`, then runs [`apply_with`].
pub fn apply_changesets(config: &ChangesetConfig, options: &ApplyOptions) -> Result<ApplyReport> {
    let start = Instant::now();
    changeset_core::log_op_start!(
        "apply",
        dry_run = options.dry_run,
        stage = options.stage,
        keep_current_version = options.keep_current_version
    );

    let store = ChangesetStore::new(config);
    let changelog = ChangelogFile::new(&config.changelog_path);
    let descriptor = ManifestDescriptor::discover(config);

    let result = apply_with(&store, &changelog, &descriptor, &config.preamble, options);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(report) => {
            changeset_core::log_op_end!(
                "apply",
                duration_ms = duration_ms,
                version = %report.plan.version(),
                consumed_count = report.plan.consumed.len()
            );
        }
        Err(e) => {
            changeset_core::log_op_error!("apply", e.clone(), duration_ms = duration_ms);
        }
    }

    result
}
