//! Completer for reedline - provides completion suggestions

use std::collections::HashSet;
use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use super::completion::CompletionEngine;
use super::session::Session;

/// Query completer for reedline
pub struct QueryCompleter {
    /// Completion engine for candidate suggestions
    engine: Arc<CompletionEngine>,

    /// Session the candidates are drawn from
    session: Session,
}

impl QueryCompleter {
    /// Create a new query completer
    ///
    /// # Arguments
    /// * `engine` - Completion engine shared with the command loop
    /// * `session` - Session state
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(engine: Arc<CompletionEngine>, session: Session) -> Self {
        Self { engine, session }
    }
}

impl Completer for QueryCompleter {
    /// Complete the input at the given cursor position
    ///
    /// Every suggestion replaces the text from the start of the line up to the
    /// cursor. Candidates that map to the same line are shown once.
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let typed = line.get(..pos).unwrap_or(line);
        let (candidates, _) = self
            .session
            .with_context(|context| self.engine.complete(typed, context));

        let mut seen = HashSet::new();
        candidates
            .iter()
            .map(|candidate| replacement_for(typed, candidate))
            .filter(|value| seen.insert(value.clone()))
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span: Span::new(0, typed.len()),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

/// Turn a candidate into the full replacement line.
///
/// Candidates that already carry the line (import paths, type casts, indexed
/// accessors) are used as-is; everything else replaces the active segment.
pub fn replacement_for(line: &str, candidate: &str) -> String {
    if candidate.starts_with(line) && !line.is_empty() {
        return candidate.to_string();
    }

    match line.rfind(':') {
        Some(idx) => {
            let committed = &line[..idx];
            let candidate = candidate.strip_prefix(':').unwrap_or(candidate);
            format!("{committed}:{candidate}")
        }
        None => candidate.to_string(),
    }
}
