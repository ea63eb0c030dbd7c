//! Error handling for the completion engine and its host shell.
//!
//! Candidate sources report problems as [`CompletionError`]; the engine
//! records them per source and never lets them reach the line editor.
//! Everything the binary can fail on funnels into [`ShellError`].
//!
//! # Example
//!
//! ```rust
//! use mediaxml_shell::error::{CompletionError, Result, ShellError};
//!
//! fn inspect() -> Result<()> {
//!     Err(CompletionError::Document("root has no children list".into()).into())
//! }
//!
//! assert!(matches!(inspect(), Err(ShellError::Completion(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CompletionError, ConfigError, Result, ShellError};
