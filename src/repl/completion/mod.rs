//! Completion system for the mediaxml query shell
//!
//! This module proposes continuations for a partially typed query line. It is
//! error-tolerant by construction: every input string is valid, and nothing a
//! source does wrong can reach the caller.
//!
//! # Architecture
//!
//! - **Segmenter**: splits the line on `:` and isolates the active segment
//! - **Position**: classifies the line into the syntactic positions that apply
//! - **Sources**: grammar, bindings, document, path and contextual candidates,
//!   each behind the [`CandidateSource`] trait
//! - **Ranker**: prefix filter, dedupe, sort, with a fallback to the full union
//! - **Engine**: folds over the sources and guards the whole pipeline
//!
//! # Examples
//!
//! ```
//! use mediaxml_shell::query::{BindingTable, FunctionRegistry};
//! use mediaxml_shell::repl::completion::{CompletionContext, CompletionEngine, MemoryFileSystem};
//!
//! let mut bindings = BindingTable::new();
//! bindings.set("title", serde_json::json!("Evening News"));
//! let functions = FunctionRegistry::new();
//! let fs = MemoryFileSystem::new();
//!
//! let context = CompletionContext::new(&bindings, &functions, &fs);
//! let (candidates, line) = CompletionEngine::new().complete("$t", &context);
//!
//! assert_eq!(candidates, vec!["$title"]);
//! assert_eq!(line, "$t");
//! ```

mod binding;
mod context;
mod contextual;
mod document;
mod engine;
mod fs;
mod grammar;
mod path;
mod position;
mod ranker;
mod segment;
mod source;

pub use binding::BindingSource;
pub use context::CompletionContext;
pub use contextual::ContextualSource;
pub use document::DocumentSource;
pub use engine::CompletionEngine;
pub use fs::{DiskFileSystem, EntryKind, FileSystem, MemoryFileSystem};
pub use grammar::GrammarSource;
pub use path::PathSource;
pub use position::{InputPosition, QueryInput};
pub use ranker::rank;
pub use segment::segment;
pub use source::{CandidateSource, CompletionRequest, SourceOutcome};
