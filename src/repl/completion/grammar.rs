//! Static query-language vocabulary
//!
//! Selector keywords, pseudo-selectors, bracket predicates, type casts and
//! ordinal accessors. The vocabulary is fixed; which parts apply is decided by
//! the input's classified positions.

use super::position::InputPosition;
use super::source::{CandidateSource, CompletionRequest};
use crate::error::CompletionError;

/// Structural accessors, always offered
pub const BASE_VOCABULARY: &[&str] = &["name", "text", "children", "attributes", "length"];

/// Pseudo-selectors, always offered
pub const SELECTOR_SUFFIXES: &[&str] = &[
    ":json",
    ":keys",
    ":text",
    ":attr",
    ":attrs",
    ":children",
    ":nth-child",
];

pub const ROOT_SELECTOR: &str = ":root";

/// Keywords valid right after an opening `[`
pub const BRACKET_VOCABULARY: &[&str] = &[
    "attributes",
    "children",
    "attr(",
    "name",
    "text",
    "import",
    "is",
    "is array",
    "is date",
    "is fragment",
    "is node",
    "is number",
    "is object",
    "is text",
    "is string",
];

/// Every type cast and type test keyword
pub const TYPE_KEYWORDS: &[&str] = &[
    "as",
    "as array",
    "as boolean",
    "as float",
    "as int",
    "as json",
    "as number",
    "as object",
    "as string",
    "as false",
    "as true",
    "as NaN",
    "as nan",
    "as null",
    "as Date",
    "as date",
    "as Document",
    "as document",
    "as Fragment",
    "as fragment",
    "as Node",
    "as node",
    "as Text",
    "as text",
    "as any",
    "as camelcase",
    "as eval",
    "as keys",
    "as pascalcase",
    "as query",
    "as reversed",
    "as snakecase",
    "as sorted",
    "as tuple",
    "as unique",
    "is",
    "is array",
    "is date",
    "is fragment",
    "is node",
    "is number",
    "is object",
    "is text",
    "is string",
];

pub const ORDINALS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

/// Number of `[n]` index forms offered after `children`
const INDEXED_CHILDREN: usize = 10;

/// Grammar candidate source
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarSource;

impl CandidateSource for GrammarSource {
    fn name(&self) -> &'static str {
        "grammar"
    }

    fn candidates(&self, request: &CompletionRequest<'_>) -> Result<Vec<String>, CompletionError> {
        let input = request.input;
        let mut candidates: Vec<String> = BASE_VOCABULARY
            .iter()
            .chain(SELECTOR_SUFFIXES)
            .map(|s| s.to_string())
            .collect();

        for position in &input.positions {
            match position {
                InputPosition::Root => candidates.push(ROOT_SELECTOR.to_string()),
                InputPosition::BracketPredicate => {
                    candidates.extend(BRACKET_VOCABULARY.iter().map(|s| s.to_string()));
                }
                InputPosition::TypeCast { stem } => {
                    candidates.extend(TYPE_KEYWORDS.iter().map(|kw| format!("{stem}{kw}")));
                }
                InputPosition::OrdinalAccessor { indexed } => {
                    if *indexed {
                        candidates
                            .extend((0..INDEXED_CHILDREN).map(|i| format!("{}[{i}]", input.line)));
                    }
                    let committed = input.committed();
                    candidates.extend(
                        ORDINALS
                            .iter()
                            .map(|ordinal| format!("{committed}:{ordinal}")),
                    );
                }
                _ => {}
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{BindingTable, FunctionRegistry};
    use crate::repl::completion::context::CompletionContext;
    use crate::repl::completion::fs::MemoryFileSystem;
    use crate::repl::completion::position::QueryInput;

    fn grammar_for(line: &str) -> Vec<String> {
        let bindings = BindingTable::new();
        let functions = FunctionRegistry::new();
        let fs = MemoryFileSystem::new();
        let context = CompletionContext::new(&bindings, &functions, &fs);
        let input = QueryInput::parse(line);
        let request = CompletionRequest {
            input: &input,
            context: &context,
        };
        GrammarSource.candidates(&request).unwrap()
    }

    #[test]
    fn test_base_vocabulary_always_present() {
        let candidates = grammar_for("program");
        for word in BASE_VOCABULARY.iter().chain(SELECTOR_SUFFIXES) {
            assert!(candidates.contains(&word.to_string()), "missing {word}");
        }
        assert!(!candidates.contains(&ROOT_SELECTOR.to_string()));
    }

    #[test]
    fn test_root_on_empty_line() {
        assert!(grammar_for("").contains(&":root".to_string()));
        assert!(grammar_for(":ro").contains(&":root".to_string()));
    }

    #[test]
    fn test_bracket_vocabulary() {
        let candidates = grammar_for("[");
        assert!(candidates.contains(&"attr(".to_string()));
        assert!(candidates.contains(&"is fragment".to_string()));
        assert!(!grammar_for("program").contains(&"attr(".to_string()));
    }

    #[test]
    fn test_type_casts_replace_keyword() {
        let candidates = grammar_for("program as ar");
        assert!(candidates.contains(&"program as array".to_string()));
        assert!(candidates.contains(&"program is text".to_string()));
        assert!(!candidates.iter().any(|c| c.starts_with("program as ar as")));
    }

    #[test]
    fn test_type_casts_keep_earlier_segments() {
        let candidates = grammar_for("items as json:name as ");
        assert!(candidates.contains(&"items as json:name as array".to_string()));
        assert!(!candidates.contains(&"items as array".to_string()));
    }

    #[test]
    fn test_indexed_children() {
        let candidates = grammar_for("program:children");
        assert!(candidates.contains(&"program:children[0]".to_string()));
        assert!(candidates.contains(&"program:children[9]".to_string()));
        assert!(!candidates.contains(&"program:children[10]".to_string()));
        assert!(candidates.contains(&"program:first".to_string()));
    }

    #[test]
    fn test_ordinals_after_colon() {
        let candidates = grammar_for("program:children:fi");
        assert!(!candidates.iter().any(|c| c.ends_with("[0]")));
        assert!(candidates.contains(&"program:children:first".to_string()));
        assert!(candidates.contains(&"program:children:tenth".to_string()));
    }
}
