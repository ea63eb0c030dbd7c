//! Shallow document inspection

use crate::error::CompletionError;

/// A node of a parsed document tree, as seen by the completion engine.
///
/// Implemented by the query engine's node type. Only the node's own tag name
/// and its immediate children are ever requested.
pub trait DocumentNode {
    /// Tag name, if the node is an element
    fn name(&self) -> Option<&str>;

    /// Immediate children of this node
    ///
    /// Returns an error when the underlying tree cannot be walked (for example a
    /// lazily parsed fragment that turned out to be malformed).
    fn children(&self) -> Result<Vec<&dyn DocumentNode>, CompletionError>;
}

/// Minimal owned element tree.
///
/// Used by the command-line host to describe a document's top level and by
/// tests; real sessions hand in the query engine's own nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    name: Option<String>,
    children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create an element with the given tag name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    /// Create a node without a tag name (text, comments)
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Append a child node
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    /// Build a root node whose children carry the given tag names
    pub fn root_with_children<I, S>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            children: children.into_iter().map(ElementNode::new).collect(),
        }
    }
}

impl DocumentNode for ElementNode {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn children(&self) -> Result<Vec<&dyn DocumentNode>, CompletionError> {
        Ok(self
            .children
            .iter()
            .map(|child| child as &dyn DocumentNode)
            .collect())
    }
}
