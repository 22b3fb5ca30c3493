//! Static analysis engine for code review.
//!
//! Parses Python with tree-sitter for structural metrics, scans raw lines of
//! any language against security, performance and style patterns, merges in
//! findings from an external advisory reviewer and reduces everything to four
//! bounded scores.

/// Detectors, aggregation and scoring
pub mod analysis;

/// Advisory collaborator contract
pub mod providers;

/// Front-end configuration
pub mod config;

/// Tracing subscriber setup
pub mod logging;

// Re-export commonly used types for convenience
pub use analysis::ast::{LanguageRegistry, LanguageSupport, ParseError, PatternLibraryError};
pub use analysis::{
    analyze, Category, CodeReviewer, Finding, PatternLibrary, ReviewRequest, ScoreBundle, Severity,
};
pub use providers::{Advisory, AdvisoryProvider};
