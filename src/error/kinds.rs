use std::{fmt, io};

/// Crate-wide `Result` type using [`ShellError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Top-level error type for the shell.
///
/// Wraps the more specific error kinds so that the host binary can surface
/// a single error type. The completion engine itself never lets one of these
/// escape [`crate::repl::completion::CompletionEngine::complete`].
#[derive(Debug)]
pub enum ShellError {
    /// Candidate generation errors.
    Completion(CompletionError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Malformed shell command.
    InvalidCommand(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors raised inside a single candidate source.
#[derive(Debug)]
pub enum CompletionError {
    /// A glob pattern built from user input was rejected.
    Pattern(String),

    /// A filesystem entry could not be inspected.
    FileSystem { path: String, source: io::Error },

    /// The document tree had an unexpected shape.
    Document(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Any other configuration problem.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Completion(e) => write!(f, "Completion error: {e}"),
            ShellError::Config(e) => write!(f, "Configuration error: {e}"),
            ShellError::Io(e) => write!(f, "I/O error: {e}"),
            ShellError::InvalidCommand(msg) => write!(f, "Invalid command: {msg}"),
            ShellError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Pattern(msg) => write!(f, "Invalid glob pattern: {msg}"),
            CompletionError::FileSystem { path, source } => {
                write!(f, "Cannot inspect '{path}': {source}")
            }
            CompletionError::Document(msg) => write!(f, "Unreadable document: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Completion(e) => Some(e),
            ShellError::Config(e) => Some(e),
            ShellError::Io(e) => Some(e),
            ShellError::InvalidCommand(_) | ShellError::Generic(_) => None,
        }
    }
}

impl std::error::Error for CompletionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompletionError::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

/* ========================= Conversions to ShellError ========================= */

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<CompletionError> for ShellError {
    fn from(err: CompletionError) -> Self {
        ShellError::Completion(err)
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::Config(err)
    }
}

impl From<String> for ShellError {
    fn from(msg: String) -> Self {
        ShellError::Generic(msg)
    }
}

impl From<&str> for ShellError {
    fn from(msg: &str) -> Self {
        ShellError::Generic(msg.to_owned())
    }
}

impl From<glob::PatternError> for CompletionError {
    fn from(err: glob::PatternError) -> Self {
        CompletionError::Pattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_wraps_kind() {
        let err = ShellError::from(CompletionError::Document("no root".to_string()));
        assert_eq!(
            err.to_string(),
            "Completion error: Unreadable document: no root"
        );
    }

    #[test]
    fn test_filesystem_error_exposes_source() {
        let err = CompletionError::FileSystem {
            path: "samples/gone.xml".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "vanished"),
        };
        assert!(err.to_string().contains("samples/gone.xml"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_invalid_value_message() {
        let err = ConfigError::InvalidValue {
            field: "completion.max_path_matches".to_string(),
            value: "0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for field 'completion.max_path_matches'"
        );
    }

    #[test]
    fn test_from_str_is_generic() {
        let err: ShellError = "boom".into();
        assert!(matches!(err, ShellError::Generic(ref m) if m == "boom"));
    }
}
