//! Finding Aggregator: runs every detector for one request and scores the result
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::ast::error::ParseError;
use crate::analysis::ast::languages::{LanguageRegistry, LanguageSupport};
use crate::analysis::finding::{Category, Finding, Severity};
use crate::analysis::patterns::PatternLibrary;
use crate::analysis::quality_scorer::ScoreBundle;
use crate::analysis::scanners::run_line_scanners;
use crate::analysis::source::SourceText;
use crate::providers::advisory::Advisory;

/// Review pipeline bound to a pattern library and a language registry.
///
/// Holds only shared references, so one reviewer can serve concurrent requests.
#[derive(Clone, Copy)]
pub struct CodeReviewer<'a> {
    patterns: &'a PatternLibrary,
    languages: &'a LanguageRegistry,
}

impl CodeReviewer<'static> {
    /// Reviewer over the process-wide pattern library and language registry
    pub fn global() -> Self {
        Self::new(PatternLibrary::global(), LanguageRegistry::global())
    }
}

impl Default for CodeReviewer<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'a> CodeReviewer<'a> {
    pub fn new(patterns: &'a PatternLibrary, languages: &'a LanguageRegistry) -> Self {
        Self {
            patterns,
            languages,
        }
    }

    /// Review one source. Total over all inputs: malformed source degrades into
    /// a synthetic finding instead of an error.
    pub fn review(&self, source: &str, language: &str, advisory: Option<&Advisory>) -> ScoreBundle {
        let text = SourceText::new(source);
        let mut issues = Vec::new();

        if !source.is_empty() {
            let support = self.languages.resolve(language);
            if support.has_tree_support() {
                issues.extend(self.tree_findings(&text, support));
            }
            issues.extend(run_line_scanners(self.patterns, &text, language));
        }

        let mut suggestions = Vec::new();
        if let Some(advisory) = advisory.filter(|a| !a.is_empty()) {
            tracing::debug!(
                findings = advisory.findings.len(),
                suggestions = advisory.suggestions.len(),
                "merging advisory"
            );
            issues.extend(advisory.findings.iter().cloned());
            suggestions.extend(advisory.suggestions.iter().cloned());
        }

        let bundle = ScoreBundle::score(&text, issues, suggestions);
        tracing::debug!(
            language,
            lines = text.line_count(),
            issues = bundle.issues.len(),
            quality = bundle.quality_score,
            "review complete"
        );
        bundle
    }

    /// Tree findings for a tree-supported language, or the syntax-error finding
    pub fn tree_findings(&self, source: &SourceText<'_>, support: &dyn LanguageSupport) -> Vec<Finding> {
        match support.parse(source.raw()) {
            Ok(tree) => support.visit_tree(&tree, source),
            Err(e) => {
                tracing::warn!(language = support.name(), line = e.line, error = %e.message, "syntax error, skipping tree analysis");
                vec![syntax_error_finding(&e, source)]
            }
        }
    }

    /// Review independent requests in parallel; output order matches input order
    pub fn review_batch(&self, requests: &[ReviewRequest]) -> Vec<ScoreBundle> {
        requests
            .par_iter()
            .map(|req| self.review(&req.source, &req.language, req.advisory.as_ref()))
            .collect()
    }
}

/// One queued review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub source: String,
    pub language: String,
    #[serde(default)]
    pub advisory: Option<Advisory>,
}

impl ReviewRequest {
    pub fn new(source: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            language: language.into(),
            advisory: None,
        }
    }

    pub fn with_advisory(mut self, advisory: Advisory) -> Self {
        self.advisory = Some(advisory);
        self
    }
}

/// HIGH bug finding standing in for a failed parse
pub fn syntax_error_finding(error: &ParseError, source: &SourceText<'_>) -> Finding {
    let line = source.clamp_line(error.line);
    Finding::new(
        line,
        Severity::High,
        Category::Bug,
        "Syntax Error",
        format!("Syntax error: {}", error.message),
        "Fix the syntax error",
        source.line(line),
    )
}

/// Review with the global reviewer, merging pre-built advisory findings last
pub fn analyze(source: &str, language: &str, external_findings: &[Finding]) -> ScoreBundle {
    let advisory = Advisory::new(external_findings.to_vec(), Vec::new());
    CodeReviewer::global().review(source, language, Some(&advisory))
}
