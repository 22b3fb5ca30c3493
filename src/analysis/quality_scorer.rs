//! Score Calculator: reduces findings plus source text to four bounded scores
//!
//! Every score is computed independently from the same borrowed finding slice.
use serde::{Deserialize, Serialize};

use crate::analysis::finding::{Category, Finding, Severity};
use crate::analysis::source::SourceText;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

const DOCSTRING_BONUS: f64 = 0.5;
const ERROR_HANDLING_BONUS: f64 = 0.3;
const SECURITY_PENALTY: f64 = 2.0;
const PERFORMANCE_PENALTY: f64 = 1.5;
const MAINTAINABILITY_PENALTY: f64 = 0.5;
const LARGE_FILE_PENALTY: f64 = 1.0;
/// Non-blank line count above which the large-file penalty applies
const LARGE_FILE_LINES: usize = 500;

const SECURITY_RECOMMENDATIONS: [&str; 4] = [
    "Implement input validation",
    "Use secure coding practices",
    "Regular security audits",
    "Keep dependencies updated",
];

const PERFORMANCE_RECOMMENDATIONS: [&str; 4] = [
    "Profile critical code paths",
    "Optimize database queries",
    "Use appropriate data structures",
    "Consider caching strategies",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySummary {
    pub total_security_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub security_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub performance_issues: usize,
    pub optimization_opportunities: usize,
    pub performance_score: f64,
    pub recommendations: Vec<String>,
}

/// Outcome of one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub quality_score: f64,
    pub security_summary: SecuritySummary,
    pub performance_summary: PerformanceSummary,
    pub maintainability_score: f64,
    /// Detection order: tree findings, line findings, then advisory findings
    pub issues: Vec<Finding>,
    pub suggestions: Vec<String>,
}

impl ScoreBundle {
    /// Compute all scores for `issues` and take ownership of both sequences
    pub fn score(source: &SourceText<'_>, issues: Vec<Finding>, suggestions: Vec<String>) -> Self {
        Self {
            quality_score: quality_score(&issues, source),
            security_summary: security_summary(&issues),
            performance_summary: performance_summary(&issues),
            maintainability_score: maintainability_score(&issues, source),
            issues,
            suggestions,
        }
    }
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// 10 minus per-severity deductions, plus docstring and error-handling bonuses.
/// Blank source is always 0.0.
pub fn quality_score(issues: &[Finding], source: &SourceText<'_>) -> f64 {
    if source.is_blank() {
        return 0.0;
    }

    let mut score = SCORE_MAX;
    for issue in issues {
        score -= issue.severity.quality_penalty();
    }

    let raw = source.raw();
    if raw.contains("\"\"\"") || raw.contains("'''") {
        score += DOCSTRING_BONUS;
    }
    if raw.contains("try:") && raw.contains("except") {
        score += ERROR_HANDLING_BONUS;
    }

    clamp_score(score)
}

pub fn security_summary(issues: &[Finding]) -> SecuritySummary {
    let security: Vec<&Finding> = issues
        .iter()
        .filter(|i| i.category == Category::Security)
        .collect();
    let count_severity =
        |severity: Severity| security.iter().filter(|i| i.severity == severity).count();

    SecuritySummary {
        total_security_issues: security.len(),
        critical_issues: count_severity(Severity::Critical),
        high_issues: count_severity(Severity::High),
        security_score: (SCORE_MAX - SECURITY_PENALTY * security.len() as f64).max(SCORE_MIN),
        recommendations: SECURITY_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn performance_summary(issues: &[Finding]) -> PerformanceSummary {
    let count = issues
        .iter()
        .filter(|i| i.category == Category::Performance)
        .count();

    PerformanceSummary {
        performance_issues: count,
        optimization_opportunities: count,
        performance_score: (SCORE_MAX - PERFORMANCE_PENALTY * count as f64).max(SCORE_MIN),
        recommendations: PERFORMANCE_RECOMMENDATIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// 10 minus 0.5 per maintainability/style finding, minus 1.0 for very large files
pub fn maintainability_score(issues: &[Finding], source: &SourceText<'_>) -> f64 {
    let count = issues
        .iter()
        .filter(|i| matches!(i.category, Category::Maintainability | Category::Style))
        .count();
    let mut score = SCORE_MAX - MAINTAINABILITY_PENALTY * count as f64;

    if source.non_blank_count() > LARGE_FILE_LINES {
        score -= LARGE_FILE_PENALTY;
    }

    clamp_score(score)
}
