//! Create command

use changeset_core::errors::{ExError, ExErrorKind};
use changeset_core::model::Severity;
use changeset_engine::{create_changeset, CreateRequest};
use changeset_store::{ChangesetConfig, ChangesetStore, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Bug fix (default)
    #[arg(long, group = "level")]
    pub patch: bool,

    /// New feature
    #[arg(long, group = "level")]
    pub minor: bool,

    /// Breaking change
    #[arg(long, group = "level")]
    pub major: bool,

    /// Severity by name: patch, minor or major
    #[arg(long = "type", value_name = "SEVERITY", group = "level")]
    pub severity: Option<Severity>,

    /// Description of the change
    #[arg(short, long, conflicts_with = "text")]
    pub message: Option<String>,

    /// Description of the change (positional form of --message)
    #[arg(value_name = "MESSAGE")]
    pub text: Option<String>,

    /// Author recorded in the header (defaults to $USER, then $USERNAME)
    #[arg(long)]
    pub author: Option<String>,
}

impl CreateArgs {
    fn severity(&self) -> Severity {
        if let Some(severity) = self.severity {
            return severity;
        }
        if self.major {
            Severity::Major
        } else if self.minor {
            Severity::Minor
        } else {
            Severity::Patch
        }
    }
}

fn default_author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "Unknown".to_string())
}

pub fn execute(args: CreateArgs, config: &ChangesetConfig) -> Result<()> {
    let severity = args.severity();
    let message = args.message.or(args.text).ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidUsage)
            .with_op("create_changeset")
            .with_message("a message is required (--message <TEXT> or positional)")
    })?;
    let author = args.author.unwrap_or_else(default_author);

    let store = ChangesetStore::new(config);
    let created = create_changeset(
        &store,
        CreateRequest::new(severity, message).with_author(author),
    )?;

    println!("Changeset created:");
    println!("  id: {}", created.record.id);
    println!("  type: {} {}", created.record.severity.emoji(), created.record.severity);
    println!("  path: {}", created.path.display());

    Ok(())
}
