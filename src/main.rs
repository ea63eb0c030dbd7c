//! mediaxml-shell
//!
//! Interactive completion shell for the mediaxml query language.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! mediaxml-shell --document ADI --child Metadata --child Asset
//!
//! # One-shot completion
//! mediaxml-shell --bind title='"News"' complete '$t'
//! ```

use std::sync::Arc;

use tracing::info;

use mediaxml_shell::cli::CliInterface;
use mediaxml_shell::error::Result;
use mediaxml_shell::formatter::Colorizer;
use mediaxml_shell::repl::ReplEngine;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the interactive shell
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli)
}

/// Run application in interactive REPL mode
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let session = cli.build_session()?;
    let engine = Arc::new(cli.build_engine());
    info!("Completion sources: {:?}", engine.source_names());

    let mut repl = ReplEngine::new(session, engine, &cli.config().history)?;
    run_repl_loop(&mut repl)?;

    if !cli.args().quiet {
        println!("Bye!");
    }
    Ok(())
}

/// Main REPL loop
fn run_repl_loop(repl: &mut ReplEngine) -> Result<()> {
    while repl.is_running() {
        let input = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        let colorizer = Colorizer::new(repl.session().get_color_enabled());
        let command = match repl.process_input(&input) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{}", colorizer.error(&e.to_string()));
                continue;
            }
        };

        match repl.execute(command) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => eprintln!("{}", colorizer.error(&e.to_string())),
        }
    }

    Ok(())
}

/// Initialize logging system
///
/// Verbosity flags are already folded into the logging configuration.
/// Logs go to stderr; stdout carries completion output only.
///
/// # Arguments
/// * `cli` - CLI interface with the effective configuration
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
