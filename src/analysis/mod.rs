//! Static analysis engine: detectors, aggregation and scoring
pub mod ast;
pub mod finding;
pub mod patterns;
pub mod quality_scorer;
pub mod review;
pub mod scanners;
pub mod source;

// Re-export commonly used types
pub use finding::{Category, Finding, Severity};
pub use patterns::{PatternEntry, PatternGroup, PatternLibrary};
pub use quality_scorer::{PerformanceSummary, ScoreBundle, SecuritySummary};
pub use review::{analyze, CodeReviewer, ReviewRequest};
pub use source::SourceText;
