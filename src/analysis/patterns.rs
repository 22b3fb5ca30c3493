//! Pattern Library: named vulnerability and performance detectors
//!
//! The library is compiled once per process and shared read-only by every
//! review. Entry order and pattern order are part of the contract because the
//! scanners emit findings in that order.
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

use crate::analysis::ast::error::PatternLibraryError;
use crate::analysis::finding::Severity;

/// Which scanner consumes an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternGroup {
    Security,
    Performance,
}

/// Static description of one detector, compiled into a [`PatternEntry`]
#[derive(Debug, Clone, Copy)]
pub struct PatternDef {
    pub key: &'static str,
    pub group: PatternGroup,
    pub sources: &'static [&'static str],
    pub severity: Severity,
    pub remediation: &'static str,
    pub case_insensitive: bool,
    /// Number of consecutive lines (joined with `\n`) each pattern is tested
    /// against. Only the performance scanner reads it; security entries are
    /// matched one line at a time.
    pub window: usize,
}

/// Compiled detector definition
#[derive(Debug, Clone)]
pub struct PatternEntry {
    key: &'static str,
    group: PatternGroup,
    patterns: Vec<Regex>,
    severity: Severity,
    remediation: &'static str,
    window: usize,
}

impl PatternEntry {
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn group(&self) -> PatternGroup {
        self.group
    }

    /// Match patterns in registration order
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn remediation(&self) -> &'static str {
        self.remediation
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

pub const FALLBACK_SECURITY_REMEDIATION: &str = "Review code for security best practices";
pub const FALLBACK_PERFORMANCE_REMEDIATION: &str = "Consider optimizing this code section";

/// Built-in detector table
pub const BUILTIN_PATTERNS: &[PatternDef] = &[
    PatternDef {
        key: "sql_injection",
        group: PatternGroup::Security,
        sources: &[
            r#"execute\s*\(\s*["'].*%.*["']"#,
            r#"execute\s*\(\s*["'][^"']*["']\s*\+"#,
            r#"query\s*=\s*["'].*%.*["']"#,
        ],
        severity: Severity::High,
        remediation: "Use parameterized queries or ORM methods",
        case_insensitive: true,
        window: 1,
    },
    PatternDef {
        key: "xss",
        group: PatternGroup::Security,
        sources: &[
            r"innerHTML\s*=\s*.*\+",
            r"document\.write\s*\(",
            r"eval\s*\(",
        ],
        severity: Severity::High,
        remediation: "Sanitize user input and use safe DOM manipulation",
        case_insensitive: true,
        window: 1,
    },
    PatternDef {
        key: "hardcoded_secrets",
        group: PatternGroup::Security,
        sources: &[
            r#"password\s*=\s*["'][^"']+["']"#,
            r#"api_key\s*=\s*["'][^"']+["']"#,
            r#"secret\s*=\s*["'][^"']+["']"#,
        ],
        severity: Severity::Medium,
        remediation: "Use environment variables or secure key management",
        case_insensitive: true,
        window: 1,
    },
    PatternDef {
        key: "path_traversal",
        group: PatternGroup::Security,
        sources: &[r"open\s*\(\s*.*\+.*\)", r"file\s*=\s*.*\+.*"],
        severity: Severity::Medium,
        remediation: "Validate and sanitize file paths",
        case_insensitive: true,
        window: 1,
    },
    PatternDef {
        key: "inefficient_loop",
        group: PatternGroup::Performance,
        sources: &[r"for.*in.*range\(len\("],
        severity: Severity::Low,
        remediation: "Use enumerate() instead of range(len())",
        case_insensitive: false,
        window: 1,
    },
    PatternDef {
        key: "string_concatenation",
        group: PatternGroup::Performance,
        sources: &[r#"\+\s*=\s*["']"#],
        severity: Severity::Low,
        remediation: "Use list.join() for multiple concatenations",
        case_insensitive: false,
        window: 1,
    },
    PatternDef {
        key: "repeated_computation",
        group: PatternGroup::Performance,
        sources: &[r"for.*in.*:.*\n.*for.*in.*:"],
        severity: Severity::Low,
        remediation: "Cache computed values or optimize algorithm",
        case_insensitive: false,
        window: 2,
    },
];

static GLOBAL: Lazy<PatternLibrary> = Lazy::new(|| match PatternLibrary::builtin() {
    Ok(library) => library,
    // Built-in table is constant; a failure here is a startup defect
    Err(e) => panic!("built-in pattern library failed to compile: {e}"),
});

/// Immutable registry of compiled detectors
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    entries: Vec<PatternEntry>,
}

impl PatternLibrary {
    /// Process-wide library, compiled on first access
    pub fn global() -> &'static PatternLibrary {
        &GLOBAL
    }

    pub fn builtin() -> Result<Self, PatternLibraryError> {
        Self::from_definitions(BUILTIN_PATTERNS)
    }

    pub fn from_definitions(defs: &[PatternDef]) -> Result<Self, PatternLibraryError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(defs.len());

        for def in defs {
            if !seen.insert((def.group, def.key)) {
                return Err(PatternLibraryError::DuplicateKey(def.key.to_string()));
            }

            let patterns = def
                .sources
                .iter()
                .map(|src| {
                    RegexBuilder::new(src)
                        .case_insensitive(def.case_insensitive)
                        .build()
                        .map_err(|source| PatternLibraryError::InvalidPattern {
                            key: def.key.to_string(),
                            pattern: src.to_string(),
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            entries.push(PatternEntry {
                key: def.key,
                group: def.group,
                patterns,
                severity: def.severity,
                remediation: def.remediation,
                window: def.window.max(1),
            });
        }

        tracing::debug!(entries = entries.len(), "pattern library compiled");
        Ok(Self { entries })
    }

    /// Entries of one group, in registration order
    pub fn group(&self, group: PatternGroup) -> impl Iterator<Item = &PatternEntry> + '_ {
        self.entries.iter().filter(move |e| e.group == group)
    }

    pub fn get(&self, group: PatternGroup, key: &str) -> Option<&PatternEntry> {
        self.group(group).find(|e| e.key == key)
    }

    /// Remediation text for a key, falling back to generic advice
    pub fn remediation_for(&self, group: PatternGroup, key: &str) -> &'static str {
        match self.get(group, key) {
            Some(entry) => entry.remediation,
            None => match group {
                PatternGroup::Security => FALLBACK_SECURITY_REMEDIATION,
                PatternGroup::Performance => FALLBACK_PERFORMANCE_REMEDIATION,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
