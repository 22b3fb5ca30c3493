use thiserror::Error;

/// Source for a tree-supported language could not be parsed.
///
/// Never leaves a review: the aggregator converts it into a "Syntax Error" finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// Best-known 1-based line of the failure
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    pub fn unsupported(language: &str) -> Self {
        Self::new(1, format!("no syntax tree support for {}", language))
    }
}

#[derive(Debug, Error)]
pub enum PatternLibraryError {
    #[error("pattern '{pattern}' registered under '{key}' failed to compile: {source}")]
    InvalidPattern {
        key: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern key '{0}' registered twice")]
    DuplicateKey(String),
}
