//! Sandboxed script engine for user-authored click-action snippets.
//!
//! Runs each snippet in a fresh `deno_core` runtime with no host bindings
//! beyond the documented `record`/`value`/`context` constants, so a snippet
//! cannot reach the filesystem, the network, or other tables.

use async_trait::async_trait;
use deno_core::{JsRuntime, RuntimeOptions};
use serde_json::Value;

use gridwire_application::{ScriptBindings, ScriptEngine};
use gridwire_core::{TableError, TableResult};

/// `deno_core`-backed script engine, enabled by the `deno-scripting` feature.
#[derive(Debug, Clone, Default)]
pub struct DenoScriptEngine;

impl DenoScriptEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptEngine for DenoScriptEngine {
    async fn run(&self, code: &str, bindings: ScriptBindings) -> TableResult<Value> {
        let script = prelude(&bindings)? + code;

        // `JsRuntime` is not `Send`; each run gets its own runtime on a
        // blocking thread.
        tokio::task::spawn_blocking(move || execute(script))
            .await
            .map_err(|error| {
                TableError::ActionExecution(format!("script thread panicked: {error}"))
            })?
    }
}

fn prelude(bindings: &ScriptBindings) -> TableResult<String> {
    let record = encode(&bindings.record)?;
    let context = encode(&bindings.context)?;

    let mut prelude = format!("const record = {record};\nconst context = {context};\n");
    if let Some(value) = &bindings.value {
        prelude.push_str(format!("const value = {};\n", encode(value)?).as_str());
    }

    Ok(prelude)
}

fn encode(value: &Value) -> TableResult<String> {
    serde_json::to_string(value).map_err(|error| {
        TableError::ActionExecution(format!("failed to encode script binding: {error}"))
    })
}

fn execute(script: String) -> TableResult<Value> {
    let mut runtime = JsRuntime::new(RuntimeOptions::default());

    runtime
        .execute_script("<click-action>", script)
        .map_err(|error| TableError::ActionExecution(error.to_string()))?;

    Ok(Value::Null)
}
