use crate::analysis::finding::{title_case_key, Category, Finding};
use crate::analysis::patterns::{PatternGroup, PatternLibrary};
use crate::analysis::scanners::LineScanner;
use crate::analysis::source::SourceText;

/// Matches every security pattern against every line (case-insensitive).
///
/// Order: category, then pattern, then line. A line hit by two patterns yields
/// two findings.
pub struct SecurityScanner<'p> {
    library: &'p PatternLibrary,
}

impl<'p> SecurityScanner<'p> {
    pub fn new(library: &'p PatternLibrary) -> Self {
        Self { library }
    }
}

impl LineScanner for SecurityScanner<'_> {
    fn scan(&self, source: &SourceText<'_>, _language: &str) -> Vec<Finding> {
        let lines = source.lines();
        let mut findings = Vec::new();

        for entry in self.library.group(PatternGroup::Security) {
            let title = format!("Potential {}", title_case_key(entry.key()));
            let description = format!(
                "Code pattern suggests potential {} vulnerability",
                entry.key()
            );

            for pattern in entry.patterns() {
                for (idx, line) in lines.iter().enumerate() {
                    if pattern.is_match(line) {
                        findings.push(Finding::new(
                            idx + 1,
                            entry.severity(),
                            Category::Security,
                            title.as_str(),
                            description.as_str(),
                            entry.remediation(),
                            line.trim(),
                        ));
                    }
                }
            }
        }

        findings
    }

    fn scanner_id(&self) -> &'static str {
        "security"
    }
}
