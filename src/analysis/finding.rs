//! Finding taxonomy shared by every detector
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue severity. Variant order defines the total ordering used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Quality-score deduction applied once per finding of this severity
    pub fn quality_penalty(self) -> f64 {
        match self {
            Self::Critical => 2.0,
            Self::High => 1.5,
            Self::Medium => 1.0,
            Self::Low => 0.5,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Closed set of issue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bug,
    Security,
    Performance,
    Maintainability,
    Style,
    BestPractice,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bug => write!(f, "bug"),
            Self::Security => write!(f, "security"),
            Self::Performance => write!(f, "performance"),
            Self::Maintainability => write!(f, "maintainability"),
            Self::Style => write!(f, "style"),
            Self::BestPractice => write!(f, "best_practice"),
        }
    }
}

/// One detected issue. Built once by a detector and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based line number
    pub line_number: usize,
    pub severity: Severity,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    pub code_snippet: String,
}

impl Finding {
    pub fn new(
        line_number: usize,
        severity: Severity,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
        code_snippet: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            severity,
            category,
            title: title.into(),
            description: description.into(),
            suggestion: suggestion.into(),
            code_snippet: code_snippet.into(),
        }
    }
}

/// Turn a registry key such as `sql_injection` into `Sql Injection`
pub fn title_case_key(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
