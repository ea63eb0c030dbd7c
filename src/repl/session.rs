use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use super::completion::{CompletionContext, FileSystem};
use crate::config::{DisplayConfig, OutputFormat};
use crate::query::{BindingTable, DocumentNode, FunctionRegistry};

/// Document root shared with the completion engine
pub type SharedDocument = Arc<dyn DocumentNode + Send + Sync>;

/// Session state shared between the line editor and the command loop.
///
/// Cloning is cheap; clones see the same bindings and document. Completion
/// requests only ever read it, through [`Session::with_context`].
#[derive(Clone)]
pub struct Session {
    /// Session variables
    bindings: Arc<RwLock<BindingTable>>,

    /// Built-in query functions, fixed for the process lifetime
    functions: Arc<FunctionRegistry>,

    /// Root of the loaded document
    document: Arc<RwLock<Option<SharedDocument>>>,

    /// Filesystem used for import paths
    filesystem: Arc<dyn FileSystem>,

    /// Output format setting
    output_format: Arc<RwLock<OutputFormat>>,

    /// Color output setting
    color_enabled: Arc<RwLock<bool>>,
}

impl Session {
    /// Create a new session.
    ///
    /// * `functions` - Built-in function registry
    /// * `filesystem` - Filesystem for import path completion
    pub fn new(functions: FunctionRegistry, filesystem: Arc<dyn FileSystem>) -> Self {
        Self::with_config(functions, filesystem, &DisplayConfig::default())
    }

    /// Create a new session with display configuration.
    ///
    /// * `functions` - Built-in function registry
    /// * `filesystem` - Filesystem for import path completion
    /// * `display_config` - Display configuration settings
    pub fn with_config(
        functions: FunctionRegistry,
        filesystem: Arc<dyn FileSystem>,
        display_config: &DisplayConfig,
    ) -> Self {
        Self {
            bindings: Arc::new(RwLock::new(BindingTable::new())),
            functions: Arc::new(functions),
            document: Arc::new(RwLock::new(None)),
            filesystem,
            output_format: Arc::new(RwLock::new(display_config.format)),
            color_enabled: Arc::new(RwLock::new(display_config.color_output)),
        }
    }

    /// Run `f` against a read-only snapshot of the session.
    ///
    /// The binding table stays read-locked while `f` runs.
    pub fn with_context<R>(&self, f: impl FnOnce(&CompletionContext<'_>) -> R) -> R {
        let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
        let document = self.document();

        let mut context =
            CompletionContext::new(&bindings, &self.functions, self.filesystem.as_ref());
        if let Some(root) = &document {
            context = context.with_document(root.as_ref());
        }

        f(&context)
    }

    /// Bind a session variable, replacing any previous value.
    pub fn bind(&self, name: impl Into<String>, value: Value) {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(name, value);
    }

    /// Remove a session variable, returning its value if it was bound.
    pub fn unbind(&self, name: &str) -> Option<Value> {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Names and values of all bindings, sorted by name.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
        bindings
            .names()
            .filter_map(|name| bindings.get(name).map(|v| (name.to_string(), v.clone())))
            .collect()
    }

    /// Built-in function registry.
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Current document root, if a document is loaded.
    pub fn document(&self) -> Option<SharedDocument> {
        self.document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the loaded document.
    pub fn set_document(&self, root: Option<SharedDocument>) {
        *self.document.write().unwrap_or_else(PoisonError::into_inner) = root;
    }

    /// Get current output format.
    pub fn get_format(&self) -> OutputFormat {
        *self.output_format.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set output format.
    pub fn set_format(&self, format: OutputFormat) {
        *self.output_format.write().unwrap_or_else(PoisonError::into_inner) = format;
    }

    /// Get current color setting.
    pub fn get_color_enabled(&self) -> bool {
        *self.color_enabled.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set color output.
    pub fn set_color_enabled(&self, enabled: bool) {
        *self.color_enabled.write().unwrap_or_else(PoisonError::into_inner) = enabled;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("bindings", &self.bindings().len())
            .field("functions", &self.functions.len())
            .field("document", &self.document().is_some())
            .field("output_format", &self.get_format())
            .finish_non_exhaustive()
    }
}
