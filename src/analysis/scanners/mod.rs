//! Line-based scanners. They work on raw lines and never need a parse.
pub mod performance;
pub mod security;
pub mod style;

pub use performance::PerformanceScanner;
pub use security::SecurityScanner;
pub use style::StyleScanner;

use crate::analysis::finding::Finding;
use crate::analysis::patterns::PatternLibrary;
use crate::analysis::source::SourceText;

/// A detector over the 1-indexed line sequence of one source
pub trait LineScanner: Send + Sync {
    fn scan(&self, source: &SourceText<'_>, language: &str) -> Vec<Finding>;

    fn scanner_id(&self) -> &'static str;
}

/// Security, then performance, then style findings
pub fn run_line_scanners(
    library: &PatternLibrary,
    source: &SourceText<'_>,
    language: &str,
) -> Vec<Finding> {
    let scanners: [&dyn LineScanner; 3] = [
        &SecurityScanner::new(library),
        &PerformanceScanner::new(library),
        &StyleScanner,
    ];

    let mut findings = Vec::new();
    for scanner in scanners {
        let found = scanner.scan(source, language);
        tracing::trace!(scanner = scanner.scanner_id(), count = found.len(), "line scan");
        findings.extend(found);
    }
    findings
}

/// Text a pattern with a `window` of N lines is tested against, starting at `index`
pub(crate) fn window_text(lines: &[&str], index: usize, window: usize) -> String {
    let end = (index + window).min(lines.len());
    lines[index..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_cut_at_end_of_file() {
        let lines = ["a", "b", "c"];
        assert_eq!(window_text(&lines, 0, 2), "a\nb");
        assert_eq!(window_text(&lines, 2, 2), "c");
        assert_eq!(window_text(&lines, 1, 1), "b");
    }
}
