//! Language capability interface and the tag-keyed registry that dispatches on it
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;
use tree_sitter::{Language, Parser, Tree};

use crate::analysis::ast::error::ParseError;
use crate::analysis::ast::visitor::{first_syntax_error, visit_tree, PythonVisitor};
use crate::analysis::finding::Finding;
use crate::analysis::source::SourceText;

/// What the engine can do for one language.
///
/// Languages without a grammar keep the defaults and are analysed by the
/// line scanners only.
pub trait LanguageSupport: Send + Sync {
    fn name(&self) -> &'static str;

    fn has_tree_support(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Tree, ParseError> {
        Err(ParseError::unsupported(self.name()))
    }

    fn visit_tree(&self, _tree: &Tree, _source: &SourceText<'_>) -> Vec<Finding> {
        Vec::new()
    }
}

/// Python via the tree-sitter grammar
pub struct PythonSupport {
    language: Language,
}

impl PythonSupport {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonSupport {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageSupport for PythonSupport {
    fn name(&self) -> &'static str {
        "python"
    }

    fn has_tree_support(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Tree, ParseError> {
        // Parsers are cheap and not Sync; one per call keeps requests independent
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(1, format!("failed to load Python grammar: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new(1, "parser produced no tree"))?;

        let root = tree.root_node();
        if let Some((line, message)) = first_syntax_error(root) {
            return Err(ParseError::new(line, message));
        }
        if root.has_error() {
            return Err(ParseError::new(1, "invalid syntax"));
        }
        Ok(tree)
    }

    fn visit_tree(&self, tree: &Tree, source: &SourceText<'_>) -> Vec<Finding> {
        visit_tree(tree.root_node(), PythonVisitor::new(source))
    }
}

/// Fallback for every language without a grammar
pub struct GenericSupport;

impl LanguageSupport for GenericSupport {
    fn name(&self) -> &'static str {
        "generic"
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: LanguageRegistry = LanguageRegistry::builtin();
}

/// Language tag -> capability implementation. Unknown tags resolve to the fallback.
pub struct LanguageRegistry {
    languages: HashMap<String, Arc<dyn LanguageSupport>>,
    fallback: Arc<dyn LanguageSupport>,
}

impl LanguageRegistry {
    /// Empty registry that resolves everything to [`GenericSupport`]
    pub fn new() -> Self {
        Self {
            languages: HashMap::new(),
            fallback: Arc::new(GenericSupport),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(&["python", "py", "python3"], Arc::new(PythonSupport::new()));
        registry
    }

    /// Shared process-wide registry
    pub fn global() -> &'static LanguageRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn register(&mut self, tags: &[&str], support: Arc<dyn LanguageSupport>) {
        for tag in tags {
            self.languages
                .insert(normalize_tag(tag), Arc::clone(&support));
        }
    }

    pub fn resolve(&self, tag: &str) -> &dyn LanguageSupport {
        let support = self
            .languages
            .get(&normalize_tag(tag))
            .unwrap_or(&self.fallback);
        &**support
    }

    pub fn has_tree_support(&self, tag: &str) -> bool {
        self.resolve(tag).has_tree_support()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

/// Language tag for a file extension (without the dot)
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "py" | "pyw" => Some("python"),
        "js" | "mjs" | "cjs" | "jsx" => Some("javascript"),
        "ts" | "tsx" => Some("typescript"),
        "java" => Some("java"),
        "cs" => Some("csharp"),
        "go" => Some("go"),
        "c" | "h" => Some("c"),
        "cpp" | "cc" | "cxx" | "hpp" | "hxx" => Some("cpp"),
        "php" => Some("php"),
        "rb" => Some("ruby"),
        "rs" => Some("rust"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_aliases_resolve_to_tree_support() {
        let registry = LanguageRegistry::builtin();
        for tag in ["python", "PY", " Python3 "] {
            assert!(registry.has_tree_support(tag), "{tag} should have tree support");
            assert_eq!(registry.resolve(tag).name(), "python");
        }
    }

    #[test]
    fn unknown_tags_fall_back_to_generic() {
        let registry = LanguageRegistry::global();
        assert_eq!(registry.resolve("javascript").name(), "generic");
        assert!(!registry.has_tree_support(""));
        assert!(registry.resolve("cobol").parse("x").is_err());
    }

    #[test]
    fn missing_colon_is_a_parse_error() {
        let err = PythonSupport::new().parse("def f()\n    return 1\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(language_for_extension("py"), Some("python"));
        assert_eq!(language_for_extension(".TS"), Some("typescript"));
        assert_eq!(language_for_extension("txt"), None);
    }
}
