use crate::analysis::finding::{Category, Finding, Severity};
use crate::analysis::scanners::LineScanner;
use crate::analysis::source::{truncated_snippet, SourceText};

/// Lines longer than this many characters are reported
pub const MAX_LINE_LENGTH: usize = 88;

const DOCSTRING_OPENERS: &[&str] = &["\"\"\"", "'''"];

/// Long lines and functions without a docstring. Both checks run on every line.
pub struct StyleScanner;

impl StyleScanner {
    fn is_function_definition(trimmed: &str) -> bool {
        trimmed.starts_with("def ")
    }

    fn opens_docstring(line: &str) -> bool {
        let trimmed = line.trim();
        DOCSTRING_OPENERS.iter().any(|o| trimmed.starts_with(o))
    }
}

impl LineScanner for StyleScanner {
    fn scan(&self, source: &SourceText<'_>, _language: &str) -> Vec<Finding> {
        let lines = source.lines();
        let mut findings = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let length = line.chars().count();
            if length > MAX_LINE_LENGTH {
                findings.push(Finding::new(
                    idx + 1,
                    Severity::Low,
                    Category::Style,
                    "Line Too Long",
                    format!("Line exceeds {} characters ({} chars)", MAX_LINE_LENGTH, length),
                    "Break line into multiple lines",
                    truncated_snippet(line),
                ));
            }

            let trimmed = line.trim();
            if Self::is_function_definition(trimmed) {
                // The last line has no follower and is not checked
                if let Some(next) = lines.get(idx + 1) {
                    if !Self::opens_docstring(next) {
                        findings.push(Finding::new(
                            idx + 1,
                            Severity::Low,
                            Category::Style,
                            "Missing Docstring",
                            "Function missing docstring",
                            "Add docstring to document function purpose",
                            trimmed,
                        ));
                    }
                }
            }
        }

        findings
    }

    fn scanner_id(&self) -> &'static str {
        "style"
    }
}
