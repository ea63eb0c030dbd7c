//! mediaxml query shell library
//!
//! Completion engine for the mediaxml query language, the line-oriented
//! selector language used to explore media manifest documents (ADI, mRSS,
//! XMLTV). Given the line typed so far and a snapshot of the session, the
//! engine proposes ranked, de-duplicated continuations.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `formatter`: Output formatting for completion results
//! - `query`: Session data the engine reads (bindings, functions, document)
//! - `repl`: Interactive shell and the completion engine itself
//!
//! # Example
//!
//! ```
//! use mediaxml_shell::query::{BindingTable, ElementNode, FunctionRegistry};
//! use mediaxml_shell::repl::completion::{CompletionContext, CompletionEngine, MemoryFileSystem};
//!
//! let bindings = BindingTable::new();
//! let functions = FunctionRegistry::new();
//! let fs = MemoryFileSystem::new();
//! let root = ElementNode::root_with_children("ADI", ["program", "ad"]);
//!
//! let context = CompletionContext::new(&bindings, &functions, &fs).with_document(&root);
//! let (candidates, _) = CompletionEngine::new().complete("**[name", &context);
//!
//! assert_eq!(candidates, vec!["**[name=\"ad\"]", "**[name=\"program\"]"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod query;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, ShellError};
pub use formatter::Formatter;
pub use repl::completion::{CompletionContext, CompletionEngine};
pub use repl::{ReplEngine, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
