//! Shell completion generation for mediaxml-shell
//!
//! Generates bash, zsh and fish scripts with clap_complete. The scripts also
//! complete the LINE argument of `mediaxml-shell complete` by calling the
//! binary itself, so query completion works from the outer shell too.

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

const BIN_NAME: &str = "mediaxml-shell";

/// Generate shell completion script on stdout
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
///
/// # Returns
/// * `Result<()>` - Success or error
pub fn generate_completion(shell_name: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completion(shell_name, &mut out)
}

/// Write the completion script for `shell_name` into `out`
pub fn write_completion(shell_name: &str, out: &mut dyn Write) -> Result<()> {
    let shell = parse_shell(shell_name)?;

    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);
    let basic_completion = String::from_utf8_lossy(&buffer);

    let extension = match shell {
        Shell::Bash => BASH_QUERY_COMPLETION.replace(
            ORIGINAL_FN,
            generated_function(&basic_completion, "complete -F "),
        ),
        Shell::Zsh => ZSH_QUERY_COMPLETION.replace(
            ORIGINAL_FN,
            generated_function(&basic_completion, "compdef "),
        ),
        _ => FISH_QUERY_COMPLETION.to_string(),
    };

    write!(out, "{}\n{}", basic_completion, extension)?;
    Ok(())
}

/// Name of the completion function clap_complete registered, found after
/// `marker` in the generated script
fn generated_function<'a>(script: &'a str, marker: &str) -> &'a str {
    script
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(marker))
        .filter_map(|rest| rest.split_whitespace().next())
        .next()
        .unwrap_or("_mediaxml-shell")
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(ConfigError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            shell_name
        ))
        .into()),
    }
}

/// Placeholder for the generated completion function in the templates below
const ORIGINAL_FN: &str = "__ORIGINAL_FN__";

const BASH_QUERY_COMPLETION: &str = r#"
# Complete query lines for `mediaxml-shell complete`
_mediaxml_shell_enhanced() {
    local cur prev words cword
    _init_completion || return

    if [[ "${words[1]}" == "complete" && $cword -eq 2 ]]; then
        local IFS=$'\n'
        COMPREPLY=($(mediaxml-shell --no-color -q complete -- "$cur" 2>/dev/null))
        return 0
    fi

    __ORIGINAL_FN__ "$@"
}

complete -F _mediaxml_shell_enhanced mediaxml-shell
"#;

const ZSH_QUERY_COMPLETION: &str = r#"
# Complete query lines for `mediaxml-shell complete`
_mediaxml_shell_queries() {
    local -a candidates
    candidates=("${(@f)$(mediaxml-shell --no-color -q complete -- "$PREFIX" 2>/dev/null)}")
    compadd -Q -U -- $candidates
}

_mediaxml_shell_enhanced() {
    if [[ ${words[2]} == "complete" && $CURRENT -eq 3 ]]; then
        _mediaxml_shell_queries
        return 0
    fi

    __ORIGINAL_FN__ "$@"
}

compdef _mediaxml_shell_enhanced mediaxml-shell
"#;

const FISH_QUERY_COMPLETION: &str = r#"
# Complete query lines for `mediaxml-shell complete`
function __mediaxml_shell_queries
    mediaxml-shell --no-color -q complete -- (commandline -ct) 2>/dev/null
end

complete -c mediaxml-shell -n "__fish_seen_subcommand_from complete" -f -a "(__mediaxml_shell_queries)"
"#;
