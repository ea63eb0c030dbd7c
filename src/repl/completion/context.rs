//! Read-only session snapshot handed to the completion engine

use super::fs::FileSystem;
use crate::query::{BindingTable, DocumentNode, FunctionRegistry};

/// Everything a completion request may look at besides the input line.
///
/// Borrowed for the duration of a single request; the engine never mutates any
/// of it.
#[derive(Clone, Copy)]
pub struct CompletionContext<'a> {
    /// Session variables
    pub bindings: &'a BindingTable,
    /// Built-in query functions
    pub functions: &'a FunctionRegistry,
    /// Root of the loaded document, if any
    pub document: Option<&'a dyn DocumentNode>,
    /// Filesystem used for import paths
    pub filesystem: &'a dyn FileSystem,
}

impl<'a> CompletionContext<'a> {
    /// Create a context without a loaded document
    pub fn new(
        bindings: &'a BindingTable,
        functions: &'a FunctionRegistry,
        filesystem: &'a dyn FileSystem,
    ) -> Self {
        Self {
            bindings,
            functions,
            document: None,
            filesystem,
        }
    }

    /// Attach the loaded document's root node
    pub fn with_document(mut self, document: &'a dyn DocumentNode) -> Self {
        self.document = Some(document);
        self
    }
}

impl std::fmt::Debug for CompletionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionContext")
            .field("bindings", &self.bindings.len())
            .field("functions", &self.functions.len())
            .field("document", &self.document.is_some())
            .finish_non_exhaustive()
    }
}
