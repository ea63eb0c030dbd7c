//! Structural selectors derived from the loaded document

use super::source::{CandidateSource, CompletionRequest};
use crate::error::CompletionError;

/// Proposes `[name="tag"]` and `**[name="tag"]` for each distinct tag among the
/// root's immediate children.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSource;

impl CandidateSource for DocumentSource {
    fn name(&self) -> &'static str {
        "document"
    }

    fn candidates(&self, request: &CompletionRequest<'_>) -> Result<Vec<String>, CompletionError> {
        let Some(root) = request.context.document else {
            return Ok(Vec::new());
        };

        let mut tags: Vec<&str> = Vec::new();
        for child in root.children()? {
            if let Some(name) = child.name()
                && !tags.contains(&name)
            {
                tags.push(name);
            }
        }

        Ok(tags
            .into_iter()
            .flat_map(|tag| [format!("[name=\"{tag}\"]"), format!("**[name=\"{tag}\"]")])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{BindingTable, DocumentNode, ElementNode, FunctionRegistry};
    use crate::repl::completion::context::CompletionContext;
    use crate::repl::completion::fs::MemoryFileSystem;
    use crate::repl::completion::position::QueryInput;

    struct DetachedNode;

    impl DocumentNode for DetachedNode {
        fn name(&self) -> Option<&str> {
            Some("ADI")
        }

        fn children(&self) -> Result<Vec<&dyn DocumentNode>, CompletionError> {
            Err(CompletionError::Document("children list detached".to_string()))
        }
    }

    fn document_candidates(document: Option<&dyn DocumentNode>) -> Result<Vec<String>, CompletionError> {
        let bindings = BindingTable::new();
        let functions = FunctionRegistry::new();
        let fs = MemoryFileSystem::new();
        let mut context = CompletionContext::new(&bindings, &functions, &fs);
        context.document = document;
        let input = QueryInput::parse("");

        DocumentSource.candidates(&CompletionRequest {
            input: &input,
            context: &context,
        })
    }

    #[test]
    fn test_no_document() {
        assert!(document_candidates(None).unwrap().is_empty());
    }

    #[test]
    fn test_distinct_child_tags() {
        let root = ElementNode::root_with_children("tv", ["programme", "channel", "programme"])
            .with_child(ElementNode::anonymous());

        let candidates = document_candidates(Some(&root)).unwrap();

        assert_eq!(
            candidates,
            vec![
                "[name=\"programme\"]",
                "**[name=\"programme\"]",
                "[name=\"channel\"]",
                "**[name=\"channel\"]",
            ]
        );
    }

    #[test]
    fn test_unreadable_document_is_error() {
        let result = document_candidates(Some(&DetachedNode));
        assert!(matches!(result, Err(CompletionError::Document(_))));
    }
}
