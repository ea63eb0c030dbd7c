//! Hinter for reedline - inline hints from history or a unique completion

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

use super::completer::replacement_for;
use super::completion::CompletionEngine;
use super::session::Session;

/// Query hinter for reedline.
///
/// Prefers the most recent history entry extending the line; otherwise, when
/// exactly one completion candidate extends it, hints the rest of that one.
pub struct QueryHinter {
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
    /// Engine used for completion hints
    engine: Arc<CompletionEngine>,
    /// Session the candidates are drawn from
    session: Session,
}

impl QueryHinter {
    /// Create a new hinter with the default style
    ///
    /// # Returns
    /// * `Self` - New hinter
    pub fn new(engine: Arc<CompletionEngine>, session: Session) -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
            engine,
            session,
        }
    }

    fn history_hint(line: &str, history: &dyn History) -> Option<String> {
        let item = history
            .search(reedline::SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()?
            .into_iter()
            .next()?;

        item.command_line
            .strip_prefix(line)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }

    fn completion_hint(&self, line: &str) -> Option<String> {
        let (candidates, _) = self
            .session
            .with_context(|context| self.engine.complete(line, context));

        let mut extensions = candidates
            .iter()
            .map(|candidate| replacement_for(line, candidate))
            .filter(|full| full.len() > line.len() && full.starts_with(line));

        let only = extensions.next()?;
        if extensions.any(|other| other != only) {
            return None;
        }

        Some(only[line.len()..].to_string())
    }
}

impl Hinter for QueryHinter {
    /// Provide a hint for the current line
    ///
    /// # Arguments
    /// * `line` - The current input line
    /// * `pos` - Cursor position
    /// * `history` - Command history
    /// * `use_ansi_coloring` - Whether to use ANSI colors
    /// * `_cwd` - Current working directory (unused)
    ///
    /// # Returns
    /// * `String` - Hint text to display after the cursor
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        // Only hint at the end of a non-empty line
        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let hint = Self::history_hint(line, history).or_else(|| self.completion_hint(line));
        let Some(hint) = hint else {
            return String::new();
        };

        self.current_hint = hint;
        if use_ansi_coloring {
            self.style.paint(&self.current_hint).to_string()
        } else {
            self.current_hint.clone()
        }
    }

    fn next_hint_token(&self) -> String {
        self.current_hint
            .split_inclusive(|c: char| c == ':' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_string()
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }
}
