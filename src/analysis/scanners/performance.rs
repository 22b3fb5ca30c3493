use crate::analysis::finding::{title_case_key, Category, Finding};
use crate::analysis::patterns::{PatternGroup, PatternLibrary};
use crate::analysis::scanners::{window_text, LineScanner};
use crate::analysis::source::SourceText;

/// Anti-pattern scan. Multi-line entries (nested loops) are matched over a
/// window starting at each line and reported at the window's first line.
pub struct PerformanceScanner<'p> {
    library: &'p PatternLibrary,
}

impl<'p> PerformanceScanner<'p> {
    pub fn new(library: &'p PatternLibrary) -> Self {
        Self { library }
    }
}

impl LineScanner for PerformanceScanner<'_> {
    fn scan(&self, source: &SourceText<'_>, _language: &str) -> Vec<Finding> {
        let lines = source.lines();
        let mut findings = Vec::new();

        for entry in self.library.group(PatternGroup::Performance) {
            let title = format!("Performance Issue: {}", title_case_key(entry.key()));
            for (idx, line) in lines.iter().enumerate() {
                let hit = if entry.window() == 1 {
                    entry.is_match(line)
                } else {
                    entry.is_match(&window_text(lines, idx, entry.window()))
                };
                if hit {
                    findings.push(Finding::new(
                        idx + 1,
                        entry.severity(),
                        Category::Performance,
                        title.as_str(),
                        "Potential performance issue detected",
                        entry.remediation(),
                        line.trim(),
                    ));
                }
            }
        }

        findings
    }

    fn scanner_id(&self) -> &'static str {
        "performance"
    }
}
