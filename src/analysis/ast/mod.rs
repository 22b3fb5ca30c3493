//! Syntax-tree analysis: language capabilities, tree walking and metrics
pub mod complexity;
pub mod error;
pub mod languages;
pub mod visitor;

// Re-export main types for convenience
pub use complexity::{cyclomatic_complexity, COMPLEXITY_THRESHOLD};
pub use error::{ParseError, PatternLibraryError};
pub use languages::{language_for_extension, GenericSupport, LanguageRegistry, LanguageSupport, PythonSupport};
pub use visitor::{walk_tree, PythonVisitor, TreeVisitor};
