//! Advisory collaborator contract: whatever produces free-text review advice
//! hands the engine a finding list plus suggestion strings.
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::finding::{Category, Finding, Severity};
use crate::analysis::source::SourceText;

static LINE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)line\s+(\d+)").expect("line reference regex is valid"));

const SUGGESTION_KEYWORDS: &[&str] = &["suggestion", "recommend"];
const ISSUE_KEYWORDS: &[&str] = &["issue", "problem", "concern", "vulnerability"];
const SECURITY_KEYWORDS: &[&str] = &["critical", "severe", "security"];
const PERFORMANCE_KEYWORDS: &[&str] = &["performance", "slow", "inefficient"];

/// Output of the advisory collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Advisory {
    pub fn new(findings: Vec<Finding>, suggestions: Vec<String>) -> Self {
        Self {
            findings,
            suggestions,
        }
    }

    /// No findings, one suggestion recording why the advisory step failed
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            findings: Vec::new(),
            suggestions: vec![format!("AI review failed: {}", error)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.suggestions.is_empty()
    }

    /// Rebuild the findings with their line numbers clamped into `source`
    pub fn clamped_to(self, source: &SourceText<'_>) -> Self {
        let findings = self
            .findings
            .into_iter()
            .map(|finding| Finding {
                line_number: source.clamp_line(finding.line_number),
                ..finding
            })
            .collect();
        Self {
            findings,
            suggestions: self.suggestions,
        }
    }
}

/// Anything that can produce advice for a source. Called by the caller, never by the engine.
pub trait AdvisoryProvider: Send + Sync {
    fn name(&self) -> &str;

    fn advise(&self, source: &str, language: &str) -> Result<Advisory>;
}

/// Run a provider, folding its failure into [`Advisory::failed`].
///
/// Reported line numbers are clamped to the reviewed source.
pub fn collect_advisory(provider: &dyn AdvisoryProvider, source: &str, language: &str) -> Advisory {
    match provider.advise(source, language) {
        Ok(advisory) => advisory.clamped_to(&SourceText::new(source)),
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "advisory provider failed");
            Advisory::failed(e)
        }
    }
}

/// Keyword classification of free-text review output.
///
/// Lines mentioning a suggestion become suggestions; lines mentioning an issue
/// become MEDIUM best-practice findings, promoted to HIGH security or to
/// performance by further keywords.
pub fn parse_review_text(content: &str) -> Advisory {
    let mut advisory = Advisory::default();

    for line in content.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if mentions(SUGGESTION_KEYWORDS) {
            advisory.suggestions.push(line.to_string());
        } else if mentions(ISSUE_KEYWORDS) {
            let line_number = LINE_REFERENCE
                .captures(line)
                .and_then(|c| c[1].parse::<usize>().ok())
                .unwrap_or(1)
                .max(1);

            let (severity, category) = if mentions(SECURITY_KEYWORDS) {
                (Severity::High, Category::Security)
            } else if mentions(PERFORMANCE_KEYWORDS) {
                (Severity::Medium, Category::Performance)
            } else {
                (Severity::Medium, Category::BestPractice)
            };

            advisory.findings.push(Finding::new(
                line_number,
                severity,
                category,
                "AI Review Finding",
                line,
                "Review and address this finding",
                "",
            ));
        }
    }

    advisory
}

/// Structured reviewer output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredReview {
    #[serde(default)]
    pub issues: Vec<StructuredIssue>,
    #[serde(default)]
    pub suggestions: Vec<StructuredSuggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredIssue {
    pub severity: String, // "info", "minor", "major", "critical", "blocker"
    pub category: String, // "correctness", "security", "performance", "maintainability", "lint", ...
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructuredSuggestion {
    Text(String),
    Detailed { description: String },
}

fn map_severity(raw: &str) -> Severity {
    match raw.trim().to_ascii_lowercase().as_str() {
        "critical" | "blocker" => Severity::Critical,
        "high" | "major" => Severity::High,
        "medium" | "moderate" => Severity::Medium,
        _ => Severity::Low,
    }
}

fn map_category(raw: &str) -> Category {
    match raw.trim().to_ascii_lowercase().as_str() {
        "bug" | "correctness" | "robustness" => Category::Bug,
        "security" => Category::Security,
        "performance" => Category::Performance,
        "maintainability" => Category::Maintainability,
        "style" | "lint" => Category::Style,
        _ => Category::BestPractice,
    }
}

impl From<StructuredReview> for Advisory {
    fn from(review: StructuredReview) -> Self {
        let findings = review
            .issues
            .into_iter()
            .map(|issue| {
                Finding::new(
                    issue.line.unwrap_or(1).max(1),
                    map_severity(&issue.severity),
                    map_category(&issue.category),
                    "AI Review Finding",
                    issue.message,
                    issue
                        .fix_suggestion
                        .unwrap_or_else(|| "Review and address this finding".to_string()),
                    "",
                )
            })
            .collect();
        let suggestions = review
            .suggestions
            .into_iter()
            .map(|s| match s {
                StructuredSuggestion::Text(text) => text,
                StructuredSuggestion::Detailed { description } => description,
            })
            .collect();
        Advisory::new(findings, suggestions)
    }
}

/// Interpret reviewer output: structured JSON when it parses, free text otherwise
pub fn parse_review_output(content: &str) -> Advisory {
    let trimmed = content.trim();
    if trimmed.starts_with('{') {
        if let Ok(review) = serde_json::from_str::<StructuredReview>(trimmed) {
            return review.into();
        }
    }
    parse_review_text(content)
}

/// Provider that replays recorded reviewer output
#[derive(Debug, Clone)]
pub struct TextAdvisory {
    content: String,
}

impl TextAdvisory {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read advisory file {}", path.display()))?;
        Ok(Self::new(content))
    }
}

impl AdvisoryProvider for TextAdvisory {
    fn name(&self) -> &str {
        "recorded"
    }

    fn advise(&self, _source: &str, _language: &str) -> Result<Advisory> {
        Ok(parse_review_output(&self.content))
    }
}
