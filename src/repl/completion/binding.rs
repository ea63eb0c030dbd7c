//! Variable and built-in function candidates

use super::source::{CandidateSource, CompletionRequest};
use crate::error::CompletionError;

/// Proposes `$name` for session variables and `$name(` for built-ins
#[derive(Debug, Clone, Copy, Default)]
pub struct BindingSource;

impl CandidateSource for BindingSource {
    fn name(&self) -> &'static str {
        "bindings"
    }

    fn candidates(&self, request: &CompletionRequest<'_>) -> Result<Vec<String>, CompletionError> {
        let context = request.context;
        let variables = context.bindings.names().map(|name| format!("${name}"));
        let functions = context.functions.names().map(|name| format!("${name}("));

        Ok(variables.chain(functions).collect())
    }
}
