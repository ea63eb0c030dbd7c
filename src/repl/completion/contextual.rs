//! Syntax continuations suggested by structural hints in the line

use super::position::InputPosition;
use super::source::{CandidateSource, CompletionRequest};
use crate::error::CompletionError;

/// Type tests offered once a `**` deep-descendant marker is present
pub const DEEP_DESCENDANT_HINTS: &[&str] = &["**[is node]", "**[is text]", "**[is not empty]"];

/// Predicate shapes offered once an open bracket is present
pub const PREDICATE_HINTS: &[&str] = &[
    "[contains \"text\"]",
    "[starts with \"prefix\"]",
    "[ends with \"suffix\"]",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualSource;

impl CandidateSource for ContextualSource {
    fn name(&self) -> &'static str {
        "contextual"
    }

    fn candidates(&self, request: &CompletionRequest<'_>) -> Result<Vec<String>, CompletionError> {
        let input = request.input;
        let mut candidates = Vec::new();

        if input.is_at(&InputPosition::DeepDescendant) {
            candidates.extend(DEEP_DESCENDANT_HINTS.iter().map(|s| s.to_string()));
        }

        if input.is_at(&InputPosition::InsideBracket) {
            candidates.extend(PREDICATE_HINTS.iter().map(|s| s.to_string()));
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

    fn contextual_for(line: &str) -> Vec<String> {
        let bindings = BindingTable::new();
        let functions = FunctionRegistry::new();
        let fs = MemoryFileSystem::new();
        let context = CompletionContext::new(&bindings, &functions, &fs);
        let input = QueryInput::parse(line);

        ContextualSource
            .candidates(&CompletionRequest {
                input: &input,
                context: &context,
            })
            .unwrap()
    }

    #[test]
    fn test_plain_line_has_no_hints() {
        assert!(contextual_for("program").is_empty());
    }

    #[test]
    fn test_deep_descendant_hints() {
        assert_eq!(
            contextual_for("**"),
            vec!["**[is node]", "**[is text]", "**[is not empty]"]
        );
    }

    #[test]
    fn test_both_triggers_fire() {
        let candidates = contextual_for("**[na");
        assert_eq!(candidates.len(), 6);
        assert!(candidates.contains(&"**[is not empty]".to_string()));
        assert!(candidates.contains(&"[starts with \"prefix\"]".to_string()));
    }
}
