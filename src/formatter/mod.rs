//! Output formatting for completion results
//!
//! - Plain output: one candidate per line, optionally colored
//! - JSON output: `{"input": ..., "candidates": [...]}`
//! - Per-source reports and binding listings for the interactive shell

mod colorizer;

pub use colorizer::Colorizer;

use serde_json::{Value, json};

use crate::config::{DisplayConfig, OutputFormat};
use crate::error::{Result, ShellError};
use crate::repl::completion::SourceOutcome;

/// Formatter for completion results
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Colorizer for output highlighting
    colorizer: Colorizer,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format_type` - Output format type
    /// * `use_colors` - Enable colored output (plain format only)
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            colorizer: Colorizer::new(use_colors && format_type == OutputFormat::Plain),
        }
    }

    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output)
    }

    /// Format ranked candidates for a line
    ///
    /// # Arguments
    /// * `candidates` - Ranked candidates
    /// * `line` - Original input line
    ///
    /// # Returns
    /// * `Result<String>` - Formatted output or error
    pub fn format_candidates(&self, candidates: &[String], line: &str) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => to_json(&json!({
                "input": line,
                "candidates": candidates,
            })),
            OutputFormat::Plain => {
                if candidates.is_empty() {
                    return Ok(self.colorizer.dim("(no candidates)"));
                }
                Ok(candidates
                    .iter()
                    .map(|c| self.colorizer.candidate(c))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }

    /// Format what each source contributed for a line
    pub fn format_sources(&self, outcomes: &[SourceOutcome], line: &str) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => {
                let sources: Vec<Value> = outcomes
                    .iter()
                    .map(|outcome| match outcome {
                        SourceOutcome::Contributed { source, candidates } => json!({
                            "source": source,
                            "candidates": candidates,
                        }),
                        SourceOutcome::Failed { source, error } => json!({
                            "source": source,
                            "error": error.to_string(),
                        }),
                    })
                    .collect();
                to_json(&json!({ "input": line, "sources": sources }))
            }
            OutputFormat::Plain => {
                let mut sections = Vec::with_capacity(outcomes.len());
                for outcome in outcomes {
                    let mut section = match outcome {
                        SourceOutcome::Contributed { source, candidates } => format!(
                            "{} {}",
                            self.colorizer.heading(source),
                            self.colorizer.dim(&format!("({})", candidates.len()))
                        ),
                        SourceOutcome::Failed { source, error } => format!(
                            "{} {}",
                            self.colorizer.heading(source),
                            self.colorizer.error(&format!("failed: {}", error))
                        ),
                    };
                    for candidate in outcome.candidates() {
                        section.push_str("\n  ");
                        section.push_str(&self.colorizer.candidate(candidate));
                    }
                    sections.push(section);
                }
                Ok(sections.join("\n"))
            }
        }
    }

    /// Format session bindings
    pub fn format_bindings(&self, bindings: &[(String, Value)]) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => {
                let map: serde_json::Map<String, Value> = bindings.iter().cloned().collect();
                to_json(&Value::Object(map))
            }
            OutputFormat::Plain => {
                if bindings.is_empty() {
                    return Ok(self.colorizer.dim("(no bindings)"));
                }
                Ok(bindings
                    .iter()
                    .map(|(name, value)| {
                        format!("{} = {}", self.colorizer.candidate(&format!("${name}")), value)
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}

fn to_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ShellError::Generic(format!("JSON serialization failed: {}", e)))
}
