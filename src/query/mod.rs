//! Read-side views of the query engine's state
//!
//! The query language itself (parsing and evaluation) lives outside this crate.
//! What the completion engine needs from it is small: the names of the
//! session's variables, the names of the built-in functions, and a shallow
//! look at the loaded document. This module defines those views.

mod bindings;
mod document;

pub use bindings::{BindingTable, BuiltinFunction, FunctionRegistry};
pub use document::{DocumentNode, ElementNode};
