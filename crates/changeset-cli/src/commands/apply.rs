//! Apply command

use changeset_core::model::Severity;
use changeset_engine::{apply_changesets, ApplyOptions, ApplyOutcome, ApplyReport};
use changeset_store::{ChangesetConfig, ChangesetStore, Result};
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Preview the new entry without writing the changelog or deleting changesets
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the project's current version instead of bumping it
    #[arg(long)]
    pub use_current_version: bool,

    /// With --dry-run, print the whole merged changelog
    #[arg(long)]
    pub full: bool,

    /// With --dry-run, mark previewed changesets as processed so the next
    /// saved preview skips them
    #[arg(long, requires = "dry_run")]
    pub save: bool,

    /// Only include changesets created on or after this date
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub from_date: Option<NaiveDate>,
}

fn parse_date(text: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD ({})", e))
}

pub fn execute(args: ApplyArgs, config: &ChangesetConfig) -> Result<()> {
    let options = ApplyOptions {
        dry_run: args.dry_run,
        keep_current_version: args.use_current_version,
        stage: args.save,
        from_date: args.from_date,
        date: None,
    };

    let report = apply_changesets(config, &options)?;
    print_report(&report, config, args.full);

    Ok(())
}

fn print_report(report: &ApplyReport, config: &ChangesetConfig, full: bool) {
    let plan = &report.plan;
    let changes = plan.changes();
    let store = ChangesetStore::new(config);

    println!(
        "Version: {} -> {} ({})",
        plan.previous_version,
        plan.version(),
        plan.entry.date.format("%Y-%m-%d")
    );
    println!(
        "Changes: {} ({} major, {} minor, {} patch)",
        changes.len(),
        changes.count(Severity::Major),
        changes.count(Severity::Minor),
        changes.count(Severity::Patch)
    );
    for severity in Severity::DISPLAY_ORDER {
        for message in changes.bucket(severity) {
            println!("  {} {}: {}", severity.emoji(), severity, message);
        }
    }
    if !plan.skipped.is_empty() {
        println!(
            "Skipped {} changeset(s) created before the from-date",
            plan.skipped.len()
        );
    }

    match report.outcome {
        ApplyOutcome::Previewed { staged } => {
            println!();
            println!("--- Preview (dry run, nothing written) ---");
            println!();
            if full {
                print!("{}", plan.document);
            } else {
                print!("{}", plan.fragment);
            }
            if staged {
                println!();
                for id in &plan.consumed {
                    println!("Marked as processed: {}", store.file_name(id));
                }
            }
        }
        ApplyOutcome::Committed => {
            println!("Updated {}", report.changelog_path.display());
            for id in &plan.consumed {
                println!("Deleted {}", store.file_name(id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-10-16").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
        assert!(parse_date("16/10/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }
}
