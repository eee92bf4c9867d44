use crate::model::{ChangelogEntry, Severity};

/// Render a changelog entry to a Markdown fragment
///
/// Generates:
/// - `## v{version} ({date})` heading, always present
/// - One `### {emoji} {section}` block per non-empty severity, major first
/// - One `- {emoji} {severity}: {message}` line per change, message verbatim
///
/// The fragment ends with exactly one newline.
pub fn render_entry(entry: &ChangelogEntry) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "## v{} ({})\n",
        entry.version,
        entry.date.format("%Y-%m-%d")
    ));

    for severity in Severity::DISPLAY_ORDER {
        let messages = entry.changes.bucket(severity);
        if messages.is_empty() {
            continue;
        }

        output.push_str(&format!(
            "\n### {} {}\n\n",
            severity.emoji(),
            severity.section_title()
        ));
        for message in messages {
            output.push_str(&format!("- {} {}: {}\n", severity.emoji(), severity, message));
        }
    }

    output
}
