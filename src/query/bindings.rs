//! Session variables and built-in function metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User-defined `$name` variables of a session.
///
/// Values are whatever the query engine assigned; completion only reads names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    values: BTreeMap<String, Value>,
}

impl BindingTable {
    /// Create an empty binding table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Remove a binding, returning its value if it existed
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Iterate over bound variable names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for BindingTable {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Metadata describing one built-in query function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinFunction {
    /// Function name as written after `$`
    pub name: String,
    /// Human readable signature, e.g. `upper(text)`
    #[serde(default)]
    pub signature: Option<String>,
}

impl BuiltinFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: None,
        }
    }

    /// Attach a signature string
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

/// Registry of built-in functions supplied by the query engine.
///
/// Built once at startup and shared read-only for the rest of the process.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, BuiltinFunction>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a list of functions
    ///
    /// # Arguments
    /// * `functions` - Functions to register; later entries replace earlier ones with the same name
    pub fn with_functions<I>(functions: I) -> Self
    where
        I: IntoIterator<Item = BuiltinFunction>,
    {
        let mut registry = Self::new();
        for function in functions {
            registry.register(function);
        }
        registry
    }

    pub fn register(&mut self, function: BuiltinFunction) {
        self.functions.insert(function.name.clone(), function);
    }

    pub fn get(&self, name: &str) -> Option<&BuiltinFunction> {
        self.functions.get(name)
    }

    /// Iterate over registered function names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
