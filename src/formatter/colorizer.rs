//! Color output support for terminal formatting

use nu_ansi_term::{Color, Style};

/// Color scheme for output highlighting
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    /// Enable colors
    enabled: bool,
}

impl Colorizer {
    /// Create a new colorizer
    ///
    /// # Arguments
    /// * `enabled` - Enable color output
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize a candidate by its shape
    ///
    /// Variables and functions are cyan, pseudo-selectors yellow, predicates and
    /// bracket forms green; plain words stay uncolored.
    pub fn candidate(&self, text: &str) -> String {
        let style = if text.starts_with('$') {
            Color::Cyan.normal()
        } else if text.starts_with(':') {
            Color::Yellow.normal()
        } else if text.starts_with('[') || text.starts_with("**") {
            Color::Green.normal()
        } else {
            Style::new()
        };

        self.paint(style, text)
    }

    /// Colorize a section heading (bold)
    pub fn heading(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    /// Colorize secondary text (dimmed)
    pub fn dim(&self, text: &str) -> String {
        self.paint(Style::new().dimmed(), text)
    }

    /// Colorize text as error (red)
    pub fn error(&self, text: &str) -> String {
        self.paint(Color::Red.normal(), text)
    }
}
