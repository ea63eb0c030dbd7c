//! Shell command parser
//!
//! Lines starting with `.` are shell commands:
//! - `.help`
//! - `.exit` (also plain `exit` and `quit`)
//! - `.bind NAME [JSON]`, `.unbind NAME`, `.bindings`
//! - `.document [ROOT TAG...]`
//! - `.sources LINE`
//!
//! Anything else is a query line whose completions get printed.

use serde_json::Value;

use crate::error::{Result, ShellError};

/// A parsed shell input line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Print ranked completions for a query line
    Complete(String),

    /// Print each source's raw contribution for a query line
    Sources(String),

    /// Bind a session variable
    Bind { name: String, value: Value },

    /// Remove a session variable
    Unbind(String),

    /// List session variables
    Bindings,

    /// Replace the document with a root and its child tags
    Document { root: String, children: Vec<String> },

    /// Clear the loaded document
    ClearDocument,

    /// Show help
    Help,

    /// Exit the shell
    Exit,
}

/// Parser for shell input lines
pub struct ShellCommandParser;

impl ShellCommandParser {
    /// Names of all shell commands, for help output
    pub const COMMANDS: &'static [&'static str] = &[
        ".help",
        ".exit",
        ".bind",
        ".unbind",
        ".bindings",
        ".document",
        ".sources",
    ];

    /// Check if input is a shell command rather than a query line
    pub fn is_shell_command(input: &str) -> bool {
        input.starts_with('.') || matches!(input, "exit" | "quit")
    }

    /// Parse an input line
    ///
    /// # Arguments
    /// * `input` - Line as typed
    ///
    /// # Returns
    /// * `Result<ShellCommand>` - Parsed command or error
    pub fn parse(input: &str) -> Result<ShellCommand> {
        let trimmed = input.trim();

        if !Self::is_shell_command(trimmed) {
            return Ok(ShellCommand::Complete(input.to_string()));
        }

        if matches!(trimmed, "exit" | "quit" | ".exit" | ".quit") {
            return Ok(ShellCommand::Exit);
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            ".help" => Ok(ShellCommand::Help),
            ".bindings" => Ok(ShellCommand::Bindings),
            ".bind" => Self::parse_bind(rest),
            ".unbind" => Ok(ShellCommand::Unbind(Self::parse_variable(rest)?)),
            ".document" => Self::parse_document(rest),
            // The query line is taken verbatim, trailing whitespace included
            ".sources" => Ok(ShellCommand::Sources(
                input
                    .trim_start()
                    .strip_prefix(".sources")
                    .map(|s| s.strip_prefix(' ').unwrap_or(s))
                    .unwrap_or_default()
                    .to_string(),
            )),
            _ => Err(ShellError::InvalidCommand(format!(
                "Unknown shell command: {} (try .help)",
                name
            ))),
        }
    }

    /// Parse `.bind NAME [JSON]`
    ///
    /// A value that is not valid JSON is bound as a string; no value binds
    /// `null`.
    fn parse_bind(rest: &str) -> Result<ShellCommand> {
        let (name, value) = match rest.split_once(char::is_whitespace) {
            Some((name, value)) => (name, value.trim()),
            None => (rest, ""),
        };

        let name = Self::parse_variable(name)?;
        let value = if value.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
        };

        Ok(ShellCommand::Bind { name, value })
    }

    /// Parse `.document [ROOT TAG...]`
    fn parse_document(rest: &str) -> Result<ShellCommand> {
        let mut words = rest.split_whitespace();
        match words.next() {
            Some(root) => Ok(ShellCommand::Document {
                root: root.to_string(),
                children: words.map(String::from).collect(),
            }),
            None => Ok(ShellCommand::ClearDocument),
        }
    }

    /// Validate a variable name, accepting an optional leading `$`
    pub fn parse_variable(input: &str) -> Result<String> {
        let name = input.strip_prefix('$').unwrap_or(input);

        if !Self::is_valid_variable(name) {
            return Err(ShellError::InvalidCommand(format!(
                "Invalid variable name: '{}'",
                input
            )));
        }

        Ok(name.to_string())
    }

    fn is_valid_variable(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            }
            _ => false,
        }
    }
}
