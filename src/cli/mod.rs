//! Command-line interface for mediaxml-shell
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Building the completion session from arguments
//! - Subcommands (one-shot completion, version, shell scripts, config)

mod completion;

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::{ConfigError, Result};
use crate::formatter::Formatter;
use crate::query::{BuiltinFunction, ElementNode, FunctionRegistry};
use crate::repl::completion::{CompletionEngine, DiskFileSystem};
use crate::repl::{Session, ShellCommandParser};

pub use completion::{generate_completion, write_completion};

/// Root tag used for `--child` when `--document` is not given
const DEFAULT_DOCUMENT_ROOT: &str = "document";

/// mediaxml-shell - query completion for media manifests
#[derive(Parser, Debug)]
#[command(
    name = "mediaxml-shell",
    version,
    about = "Query completion shell for media manifest documents",
    long_about = "Interactive completion shell for the mediaxml query language. Proposes
selectors, pseudo-selectors, type casts, variables and import paths for a partially
typed query line."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Directory import paths are resolved against (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Bind a session variable; VALUE is parsed as JSON, else taken as a string
    #[arg(long = "bind", value_name = "NAME[=VALUE]")]
    pub bindings: Vec<String>,

    /// Register a built-in function name
    #[arg(long = "function", value_name = "NAME")]
    pub functions: Vec<String>,

    /// Root tag of the loaded document
    #[arg(long = "document", value_name = "TAG")]
    pub document: Option<String>,

    /// Child tag of the loaded document's root
    #[arg(long = "child", value_name = "TAG")]
    pub children: Vec<String>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for mediaxml-shell
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print completions for a query line and exit
    Complete {
        /// Query line typed so far
        #[arg(value_name = "LINE", allow_hyphen_values = true)]
        line: String,

        /// Output format (plain, json)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,
    },

    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.display.color_output = false;
        }

        if let Some(Commands::Complete {
            format: Some(format),
            ..
        }) = &args.command
        {
            config.display.format = Self::parse_output_format(format);
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> OutputFormat {
        OutputFormat::parse(format_str).unwrap_or_else(|| {
            eprintln!("Warning: Unknown format '{}', using plain", format_str);
            OutputFormat::Plain
        })
    }

    /// Build the completion engine from configuration
    pub fn build_engine(&self) -> CompletionEngine {
        CompletionEngine::from_config(&self.config.completion)
    }

    /// Build the session from arguments
    ///
    /// # Returns
    /// * `Result<Session>` - Session with bindings, functions and document applied
    pub fn build_session(&self) -> Result<Session> {
        let functions = FunctionRegistry::with_functions(
            self.args.functions.iter().map(BuiltinFunction::new),
        );

        let filesystem = match &self.args.root {
            Some(root) => DiskFileSystem::new(root),
            None => DiskFileSystem::current_dir()?,
        };

        let session =
            Session::with_config(functions, Arc::new(filesystem), &self.config.display);

        for binding in &self.args.bindings {
            let (name, value) = Self::parse_binding(binding)?;
            session.bind(name, value);
        }

        if self.args.document.is_some() || !self.args.children.is_empty() {
            let root = self
                .args
                .document
                .as_deref()
                .unwrap_or(DEFAULT_DOCUMENT_ROOT);
            session.set_document(Some(Arc::new(ElementNode::root_with_children(
                root,
                self.args.children.iter().cloned(),
            ))));
        }

        Ok(session)
    }

    /// Parse a `NAME[=VALUE]` binding argument
    fn parse_binding(binding: &str) -> Result<(String, Value)> {
        let (name, value) = match binding.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (binding, None),
        };

        let name = ShellCommandParser::parse_variable(name)?;
        let value = match value {
            Some(raw) => {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            }
            None => Value::Null,
        };

        Ok((name, value))
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Complete { line, .. }) => {
                println!("{}", self.complete_line(line)?);
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Complete a single line and format the result
    ///
    /// # Arguments
    /// * `line` - Query line typed so far
    ///
    /// # Returns
    /// * `Result<String>` - Formatted candidates
    pub fn complete_line(&self, line: &str) -> Result<String> {
        let session = self.build_session()?;
        let engine = self.build_engine();
        let (candidates, line) = session.with_context(|context| engine.complete(line, context));

        Formatter::from_config(&self.config.display).format_candidates(&candidates, &line)
    }

    /// Show version information
    fn show_version(&self) {
        println!("mediaxml-shell version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let config = Config::from_file(&path)?;
        config.validate()?;
        println!("Configuration is valid");

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("# Configuration file: {}", path.display());
        println!();
        println!("{}", self.config.to_toml()?);

        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner for the interactive shell
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("mediaxml-shell {}", env!("CARGO_PKG_VERSION"));
            println!("Type a query and press Tab to complete, .help for commands.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn cli_from(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["mediaxml-shell"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.bindings.is_empty());
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(["mediaxml-shell", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_repeatable_options() {
        let args = CliArgs::try_parse_from([
            "mediaxml-shell",
            "--bind",
            "title=\"News\"",
            "--bind",
            "count=3",
            "--child",
            "program",
            "--child",
            "ad",
        ])
        .unwrap();
        assert_eq!(args.bindings, vec!["title=\"News\"", "count=3"]);
        assert_eq!(args.children, vec!["program", "ad"]);
    }

    #[test]
    fn test_complete_subcommand() {
        let args =
            CliArgs::try_parse_from(["mediaxml-shell", "complete", "items:te", "--format", "json"])
                .unwrap();
        match args.command {
            Some(Commands::Complete { line, format }) => {
                assert_eq!(line, "items:te");
                assert_eq!(format.as_deref(), Some("json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_override_config() {
        let args = CliArgs::try_parse_from([
            "mediaxml-shell",
            "--no-color",
            "-v",
            "complete",
            "x",
            "--format",
            "json",
        ])
        .unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert!(!config.display.color_output);
        assert_eq!(config.display.format, OutputFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(
            CliInterface::parse_binding("count=3").unwrap(),
            ("count".to_string(), json!(3))
        );
        assert_eq!(
            CliInterface::parse_binding("$title=Evening News").unwrap(),
            ("title".to_string(), json!("Evening News"))
        );
        assert_eq!(
            CliInterface::parse_binding("feed").unwrap(),
            ("feed".to_string(), Value::Null)
        );
        assert!(CliInterface::parse_binding("=3").is_err());
    }

    #[test]
    fn test_complete_line_with_bindings() {
        let cli = cli_from(&[
            "mediaxml-shell",
            "--no-color",
            "--bind",
            "title=\"News\"",
            "--function",
            "upper",
        ]);
        assert_eq!(cli.complete_line("$t").unwrap(), "$title");
        assert_eq!(cli.complete_line("$u").unwrap(), "$upper(");
    }

    #[test]
    fn test_complete_line_with_document() {
        let cli = cli_from(&[
            "mediaxml-shell",
            "--no-color",
            "--document",
            "ADI",
            "--child",
            "program",
        ]);
        let output = cli.complete_line("**[name").unwrap();
        assert!(output.contains("**[name=\"program\"]"));
    }

    #[test]
    fn test_complete_line_against_root_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("samples")).unwrap();
        let mut file = std::fs::File::create(dir.path().join("samples/feed.xml")).unwrap();
        writeln!(file, "<rss/>").unwrap();

        let root = dir.path().to_string_lossy().to_string();
        let cli = cli_from(&["mediaxml-shell", "--no-color", "--root", &root]);
        let output = cli.complete_line("import \"samples/fe").unwrap();
        assert_eq!(output, "import \"samples/feed.xml");
    }
}
