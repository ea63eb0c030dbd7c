//! Candidate source abstraction
//!
//! Every knowledge source the engine draws on implements [`CandidateSource`].
//! Sources are pure: given the same request they return the same candidates and
//! touch nothing else. A source that fails returns an error, which the engine
//! records as a [`SourceOutcome`] instead of surfacing it.

use super::context::CompletionContext;
use super::position::QueryInput;
use crate::error::CompletionError;

/// One completion request as seen by a candidate source
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// Segmented and classified input line
    pub input: &'a QueryInput<'a>,
    /// Session snapshot
    pub context: &'a CompletionContext<'a>,
}

/// Trait for producing completion candidates
pub trait CandidateSource: Send + Sync {
    /// Short name used in logs and outcome reports
    fn name(&self) -> &'static str;

    /// Produce the candidates this source proposes for the request.
    ///
    /// Candidates are not filtered by prefix; the ranker does that over the
    /// union of all sources.
    fn candidates(&self, request: &CompletionRequest<'_>) -> Result<Vec<String>, CompletionError>;
}

/// Result of running one source for one request
#[derive(Debug)]
pub enum SourceOutcome {
    /// The source ran and proposed these candidates (possibly none)
    Contributed {
        source: &'static str,
        candidates: Vec<String>,
    },

    /// The source failed; it contributes nothing to this request
    Failed {
        source: &'static str,
        error: CompletionError,
    },
}

impl SourceOutcome {
    /// Name of the source this outcome belongs to
    pub fn source(&self) -> &'static str {
        match self {
            Self::Contributed { source, .. } | Self::Failed { source, .. } => *source,
        }
    }

    /// Candidates contributed, empty for a failed source
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Contributed { candidates, .. } => candidates,
            Self::Failed { .. } => &[],
        }
    }

    pub fn into_candidates(self) -> Vec<String> {
        match self {
            Self::Contributed { candidates, .. } => candidates,
            Self::Failed { .. } => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_contributes_nothing() {
        let outcome = SourceOutcome::Failed {
            source: "document",
            error: CompletionError::Document("detached node".to_string()),
        };

        assert!(outcome.is_failed());
        assert_eq!(outcome.source(), "document");
        assert!(outcome.candidates().is_empty());
        assert!(outcome.into_candidates().is_empty());
    }

    #[test]
    fn test_contributed_outcome() {
        let outcome = SourceOutcome::Contributed {
            source: "contextual",
            candidates: vec!["**[is node]".to_string()],
        };

        assert!(!outcome.is_failed());
        assert_eq!(outcome.candidates().to_vec(), vec!["**[is node]".to_string()]);
    }
}
