/// Prefix of a top-level Markdown title line
pub const TITLE_MARKER: &str = "# ";

/// Title block written at the top of a newly created changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    pub title: String,
    pub description: Option<String>,
}

impl Default for Preamble {
    fn default() -> Self {
        Self {
            title: "Changelog".to_string(),
            description: None,
        }
    }
}

impl Preamble {
    pub fn render(&self) -> String {
        let mut output = format!("{}{}\n\n", TITLE_MARKER, self.title);
        if let Some(description) = &self.description {
            output.push_str(description.trim_end());
            output.push_str("\n\n");
        }
        output
    }
}

/// Splice a rendered fragment into a changelog document
///
/// - `None` (no document yet): preamble followed by the fragment
/// - Document with a title line: fragment inserted right after the first
///   line starting with `# `, separated by one blank line
/// - Document without a title line: fragment prepended
///
/// All bytes of the existing document are kept, in order. The only bytes
/// added besides the fragment are separator newlines at the insertion point.
pub fn merge_changelog(existing: Option<&str>, fragment: &str, preamble: &Preamble) -> String {
    let Some(document) = existing else {
        let mut output = preamble.render();
        push_fragment(&mut output, fragment);
        return output;
    };

    let mut output = String::with_capacity(document.len() + fragment.len() + 2);

    match title_line_end(document) {
        Some(end) => {
            let (head, tail) = document.split_at(end);
            output.push_str(head);
            if !head.ends_with('\n') {
                output.push('\n');
            }
            output.push('\n');
            push_fragment(&mut output, fragment);
            push_separated_tail(&mut output, tail);
        }
        None => {
            push_fragment(&mut output, fragment);
            push_separated_tail(&mut output, document);
        }
    }

    output
}

/// Byte offset just past the first title line (including its newline)
fn title_line_end(document: &str) -> Option<usize> {
    let mut offset = 0;
    for line in document.split_inclusive('\n') {
        let end = offset + line.len();
        if line.starts_with(TITLE_MARKER) {
            return Some(end);
        }
        offset = end;
    }
    None
}

fn push_fragment(output: &mut String, fragment: &str) {
    output.push_str(fragment);
    if !fragment.ends_with('\n') {
        output.push('\n');
    }
}

fn push_separated_tail(output: &mut String, tail: &str) {
    if !tail.is_empty() && !starts_with_blank_line(tail) {
        output.push('\n');
    }
    output.push_str(tail);
}

fn starts_with_blank_line(text: &str) -> bool {
    text.starts_with('\n') || text.starts_with("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = "## v1.3.0 (2026-10-16)\n\n### ✨ Features\n\n- ✨ minor: add Y\n";

    #[test]
    fn test_absent_document_gets_preamble() {
        let merged = merge_changelog(None, FRAGMENT, &Preamble::default());
        assert_eq!(merged, format!("# Changelog\n\n{}", FRAGMENT));
    }

    #[test]
    fn test_absent_document_with_description() {
        let preamble = Preamble {
            title: "Release Notes".to_string(),
            description: Some("All notable changes.".to_string()),
        };

        let merged = merge_changelog(None, FRAGMENT, &preamble);
        assert_eq!(
            merged,
            format!("# Release Notes\n\nAll notable changes.\n\n{}", FRAGMENT)
        );
    }

    #[test]
    fn test_empty_present_document_is_not_absent() {
        let merged = merge_changelog(Some(""), FRAGMENT, &Preamble::default());
        assert_eq!(merged, FRAGMENT);
    }

    #[test]
    fn test_insert_after_title() {
        let doc = "# Changelog\n\n## v1.2.3 (2026-01-01)\n\n- 🐛 patch: old\n";
        let merged = merge_changelog(Some(doc), FRAGMENT, &Preamble::default());

        assert_eq!(
            merged,
            format!(
                "# Changelog\n\n{}\n## v1.2.3 (2026-01-01)\n\n- 🐛 patch: old\n",
                FRAGMENT
            )
        );
    }

    #[test]
    fn test_insert_after_first_title_only() {
        let doc = "intro line\n# First\nbody\n# Second\n";
        let merged = merge_changelog(Some(doc), FRAGMENT, &Preamble::default());

        assert!(merged.starts_with("intro line\n# First\n\n## v1.3.0"));
        assert!(merged.ends_with("\nbody\n# Second\n"));
    }

    #[test]
    fn test_subheadings_are_not_titles() {
        let doc = "## v1.0.0 (2025-01-01)\n\n- 🐛 patch: old\n";
        let merged = merge_changelog(Some(doc), FRAGMENT, &Preamble::default());

        assert_eq!(merged, format!("{}\n{}", FRAGMENT, doc));
    }

    #[test]
    fn test_title_without_trailing_newline() {
        let merged = merge_changelog(Some("# Changelog"), FRAGMENT, &Preamble::default());
        assert_eq!(merged, format!("# Changelog\n\n{}", FRAGMENT));
    }

    #[test]
    fn test_original_bytes_preserved_around_insertion() {
        let doc = "# Changelog\r\n\r\nSome *odd*   spacing\n\n\n## v0.1.0\n";
        let merged = merge_changelog(Some(doc), FRAGMENT, &Preamble::default());

        let head = "# Changelog\r\n";
        let tail = &doc[head.len()..];
        assert!(merged.starts_with(head));
        assert!(merged.ends_with(tail));
        assert!(merged.contains(FRAGMENT));
        assert_eq!(merged.len(), doc.len() + FRAGMENT.len() + 1);
    }
}
