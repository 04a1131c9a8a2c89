//! Caller-supplied data context and the static provider table.
//!
//! A [`DataContext`] bundles the plain values a template evaluates against
//! with named [`Namespace`] providers (e.g. `local`, `oda`) that expose
//! callable capabilities to expressions. Providers are registered up front
//! by the caller; expression text is never inspected to trigger loading.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::{Object, Value};
use serde::Serialize;

/// A named bundle of values and callables exposed to expressions.
///
/// Register a callable with [`minijinja::value::Value::from_function`]:
///
/// ```
/// use minijinja::value::Value;
/// use texdraft_render::Namespace;
///
/// let oda = Namespace::new()
///     .with_value("evaluate", Value::from_function(|expr: String| expr.len()));
/// assert_eq!(oda.names().collect::<Vec<_>>(), ["evaluate"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: BTreeMap<String, Value>,
}

impl Namespace {
    /// Create an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member under `name`. Pass a `Value::from_function` result to
    /// expose a callable.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Member names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Object for Namespace {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        self.entries.get(key.as_str()?).cloned()
    }
}

/// Read-only name/value bindings for a render call.
///
/// Owned by the caller and passed by reference into every render
/// operation; the renderer never mutates it.
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    base: Value,
    providers: BTreeMap<String, Value>,
}

impl DataContext {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from any serializable mapping.
    pub fn from_serialize<T: Serialize>(data: T) -> Self {
        Self {
            base: Value::from_serialize(data),
            providers: BTreeMap::new(),
        }
    }

    /// Register a provider namespace under `name`.
    ///
    /// Provider names shadow base values of the same name.
    #[must_use]
    pub fn with_provider(mut self, name: impl Into<String>, namespace: Namespace) -> Self {
        self.providers
            .insert(name.into(), Value::from_object(namespace));
        self
    }

    /// Names of the registered providers.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Merge base values and providers into a single evaluation root.
    pub(crate) fn to_value(&self) -> Value {
        Value::from_object(ContextRoot {
            base: self.base.clone(),
            providers: self.providers.clone(),
        })
    }
}

/// Evaluation root: provider lookups layered over the base mapping.
#[derive(Debug)]
struct ContextRoot {
    base: Value,
    providers: BTreeMap<String, Value>,
}

impl Object for ContextRoot {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        if let Some(name) = key.as_str() {
            if let Some(provider) = self.providers.get(name) {
                return Some(provider.clone());
            }
        }
        match self.base.get_item(key) {
            Ok(value) if !value.is_undefined() => Some(value),
            _ => None,
        }
    }
}
