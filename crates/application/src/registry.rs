use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

/// Handler behind a legacy named click function: `(record, value)`.
pub type NamedClickHandler = Arc<dyn Fn(&Value, &Value) + Send + Sync>;

/// Custom render function: `(value, record)` to a renderable value.
pub type CustomRenderFn = Arc<dyn Fn(&Value, &Value) -> Value + Send + Sync>;

/// Injected registry of named click handlers.
///
/// This replaces the legacy process-wide global namespace lookup: hosts
/// register their functions explicitly and pass the registry through the
/// render context.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    handlers: HashMap<String, NamedClickHandler>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: NamedClickHandler) {
        self.handlers.insert(name.into(), handler);
    }

    /// Looks up a handler by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NamedClickHandler> {
        self.handlers.get(name)
    }

    /// Returns whether a handler is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

/// Injected registry of custom render functions for `custom` columns.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: HashMap<String, CustomRenderFn>,
}

impl RendererRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a render function under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, renderer: CustomRenderFn) {
        self.renderers.insert(name.into(), renderer);
    }

    /// Looks up a render function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CustomRenderFn> {
        self.renderers.get(name)
    }
}
