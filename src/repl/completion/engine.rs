//! Completion engine - orchestrates the completion flow
//!
//! The engine classifies the line once, folds over its ordered list of
//! candidate sources, records what each one contributed and hands the union to
//! the ranker. Nothing that goes wrong inside the pipeline reaches the caller.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use super::binding::BindingSource;
use super::context::CompletionContext;
use super::contextual::ContextualSource;
use super::document::DocumentSource;
use super::grammar::GrammarSource;
use super::path::PathSource;
use super::position::QueryInput;
use super::ranker::rank;
use super::segment::segment;
use super::source::{CandidateSource, CompletionRequest, SourceOutcome};
use crate::config::CompletionConfig;

/// Main completion engine
pub struct CompletionEngine {
    /// Sources in priority order
    sources: Vec<Box<dyn CandidateSource>>,
    /// Return the whole union when nothing matches the active segment
    fallback_to_all: bool,
}

impl CompletionEngine {
    /// Create an engine with every source enabled and default settings
    pub fn new() -> Self {
        Self::from_config(&CompletionConfig::default())
    }

    /// Create an engine from the completion section of the configuration
    ///
    /// Sources are registered in priority order: grammar, bindings, document,
    /// path, contextual. Document and path sources can be switched off.
    pub fn from_config(config: &CompletionConfig) -> Self {
        let mut sources: Vec<Box<dyn CandidateSource>> =
            vec![Box::new(GrammarSource), Box::new(BindingSource)];

        if config.document_completion {
            sources.push(Box::new(DocumentSource));
        }
        if config.path_completion {
            sources.push(Box::new(PathSource::new(config.max_path_matches)));
        }
        sources.push(Box::new(ContextualSource));

        Self {
            sources,
            fallback_to_all: config.fallback_to_all,
        }
    }

    /// Create an engine over an explicit list of sources
    ///
    /// # Arguments
    /// * `sources` - Sources in priority order
    /// * `fallback_to_all` - Return the full union when no candidate matches
    pub fn with_sources(sources: Vec<Box<dyn CandidateSource>>, fallback_to_all: bool) -> Self {
        Self {
            sources,
            fallback_to_all,
        }
    }

    /// Append a source after the existing ones
    pub fn push_source(&mut self, source: Box<dyn CandidateSource>) {
        self.sources.push(source);
    }

    /// Names of the registered sources, in priority order
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Run every source for a line and report what each one produced
    ///
    /// Candidates are unfiltered. Failed sources are logged and reported as
    /// [`SourceOutcome::Failed`].
    pub fn collect(&self, line: &str, context: &CompletionContext<'_>) -> Vec<SourceOutcome> {
        let input = QueryInput::parse(line);
        let request = CompletionRequest {
            input: &input,
            context,
        };

        self.sources
            .iter()
            .map(|source| match source.candidates(&request) {
                Ok(candidates) => SourceOutcome::Contributed {
                    source: source.name(),
                    candidates,
                },
                Err(e) => {
                    debug!("Completion source '{}' failed: {}", source.name(), e);
                    SourceOutcome::Failed {
                        source: source.name(),
                        error: e,
                    }
                }
            })
            .collect()
    }

    /// Complete the input line
    ///
    /// # Arguments
    /// * `line` - The input line typed so far
    /// * `context` - Session snapshot for this request
    ///
    /// # Returns
    /// * `(Vec<String>, String)` - Ranked candidates and the unmodified line
    pub fn complete(&self, line: &str, context: &CompletionContext<'_>) -> (Vec<String>, String) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let (_, active) = segment(line);
            let union: Vec<String> = self
                .collect(line, context)
                .into_iter()
                .flat_map(SourceOutcome::into_candidates)
                .collect();

            rank(union, active, self.fallback_to_all)
        }));

        match result {
            Ok(candidates) => (candidates, line.to_string()),
            Err(payload) => {
                error!(
                    "Completion failed for input {:?}: {}",
                    line,
                    panic_message(payload.as_ref())
                );
                (Vec::new(), line.to_string())
            }
        }
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEngine")
            .field("sources", &self.source_names())
            .field("fallback_to_all", &self.fallback_to_all)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
