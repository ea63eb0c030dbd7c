//! REPL (Read-Eval-Print Loop) engine for the query shell
//!
//! This module provides an interactive shell around the completion engine:
//! - Line editing with reedline and a columnar completion menu on Tab
//! - Command history, optionally persisted to a file
//! - Inline hints from history or a unique completion
//! - Shell commands for managing bindings and the loaded document
//!
//! Query lines are never evaluated; the shell prints their completions.

pub mod completion;

mod command;
mod completer;
mod hinter;
mod prompt;
mod session;

use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::{debug, warn};

pub use command::{ShellCommand, ShellCommandParser};
pub use completer::{QueryCompleter, replacement_for};
pub use hinter::QueryHinter;
pub use prompt::ShellPrompt;
pub use session::{Session, SharedDocument};

use crate::config::HistoryConfig;
use crate::error::{Result, ShellError};
use crate::formatter::Formatter;
use crate::query::{DocumentNode, ElementNode};
use completion::CompletionEngine;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive completion
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Session shared with the completer and hinter
    session: Session,

    /// Completion engine shared with the completer and hinter
    engine: Arc<CompletionEngine>,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `session` - Session state
    /// * `engine` - Completion engine
    /// * `history_config` - History configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        session: Session,
        engine: Arc<CompletionEngine>,
        history_config: &HistoryConfig,
    ) -> Result<Self> {
        let completer = Box::new(QueryCompleter::new(engine.clone(), session.clone()));
        let hinter = Box::new(QueryHinter::new(engine.clone(), session.clone()));
        let completion_menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_history(Self::create_history(history_config)?)
            .with_completer(completer)
            .with_hinter(hinter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self {
            editor,
            session,
            engine,
            running: true,
        })
    }

    /// Build the history backend, falling back to in-memory history when the
    /// history file cannot be used
    fn create_history(config: &HistoryConfig) -> Result<Box<FileBackedHistory>> {
        if config.persist {
            if let Some(parent) = config.file_path.parent()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                debug!("Cannot create history directory {}: {}", parent.display(), e);
            }
            match FileBackedHistory::with_file(config.max_size, config.file_path.clone()) {
                Ok(history) => return Ok(Box::new(history)),
                Err(e) => warn!(
                    "Cannot use history file {}: {}",
                    config.file_path.display(),
                    e
                ),
            }
        }

        FileBackedHistory::new(config.max_size)
            .map(Box::new)
            .map_err(|e| ShellError::Generic(format!("Cannot create history: {}", e)))
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line or None on EOF / interrupt
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let root = self
            .session
            .document()
            .and_then(|doc| doc.name().map(str::to_string));
        let prompt = ShellPrompt::new(root);

        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => Ok(None),
            Ok(other) => {
                debug!("Ignoring editor signal {:?}", other);
                Ok(Some(String::new()))
            }
            Err(err) => Err(ShellError::Generic(format!("Read error: {}", err))),
        }
    }

    /// Process user input and parse into command
    pub fn process_input(&self, input: &str) -> Result<ShellCommand> {
        ShellCommandParser::parse(input)
    }

    /// Execute a parsed command
    ///
    /// # Arguments
    /// * `command` - Command to execute
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Output to print, if any
    pub fn execute(&mut self, command: ShellCommand) -> Result<Option<String>> {
        execute_command(&self.session, &self.engine, command, &mut self.running)
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Session shared with the editor
    pub fn session(&self) -> &Session {
        &self.session
    }
}

/// Execute a shell command against a session.
///
/// Split from [`ReplEngine`] so it can run without a terminal.
pub fn execute_command(
    session: &Session,
    engine: &CompletionEngine,
    command: ShellCommand,
    running: &mut bool,
) -> Result<Option<String>> {
    let formatter = Formatter::new(session.get_format(), session.get_color_enabled());

    match command {
        ShellCommand::Complete(line) => {
            let (candidates, line) = session.with_context(|context| engine.complete(&line, context));
            formatter.format_candidates(&candidates, &line).map(Some)
        }
        ShellCommand::Sources(line) => {
            let outcomes = session.with_context(|context| engine.collect(&line, context));
            formatter.format_sources(&outcomes, &line).map(Some)
        }
        ShellCommand::Bind { name, value } => {
            debug!("Binding ${}", name);
            session.bind(name, value);
            Ok(None)
        }
        ShellCommand::Unbind(name) => match session.unbind(&name) {
            Some(_) => Ok(None),
            None => Err(ShellError::InvalidCommand(format!("${} is not bound", name))),
        },
        ShellCommand::Bindings => formatter.format_bindings(&session.bindings()).map(Some),
        ShellCommand::Document { root, children } => {
            let message = format!("Document root <{}> with {} children", root, children.len());
            session.set_document(Some(Arc::new(ElementNode::root_with_children(
                root, children,
            ))));
            Ok(Some(message))
        }
        ShellCommand::ClearDocument => {
            session.set_document(None);
            Ok(Some("Document cleared".to_string()))
        }
        ShellCommand::Help => Ok(Some(help_text())),
        ShellCommand::Exit => {
            *running = false;
            Ok(None)
        }
    }
}

fn help_text() -> String {
    [
        "Type a query line to list its completions; press Tab to complete in place.",
        "",
        "Commands:",
        "  .help                     Show this help",
        "  .exit                     Leave the shell (also: exit, quit)",
        "  .bind NAME [JSON]         Bind a session variable",
        "  .unbind NAME              Remove a session variable",
        "  .bindings                 List session variables",
        "  .document [ROOT TAG...]   Describe the loaded document, or clear it",
        "  .sources LINE             Show what each completion source proposes",
    ]
    .join("\n")
}
