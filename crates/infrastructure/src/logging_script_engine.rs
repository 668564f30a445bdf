//! Script engine stand-in for hosts without script support. Logs and skips.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use gridwire_application::{ScriptBindings, ScriptEngine};
use gridwire_core::TableResult;

/// Default script engine that logs the invocation and runs nothing.
///
/// Keeps `javascript` actions and custom handler code from failing hard in
/// builds without a real engine; enable the `deno-scripting` feature for one.
#[derive(Debug, Clone, Default)]
pub struct LoggingScriptEngine;

impl LoggingScriptEngine {
    /// Creates a new logging script engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptEngine for LoggingScriptEngine {
    async fn run(&self, code: &str, bindings: ScriptBindings) -> TableResult<Value> {
        warn!(
            code = code,
            context = %bindings.context,
            "script execution skipped: no script engine built in"
        );
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use gridwire_application::{ScriptBindings, ScriptEngine};

    use super::LoggingScriptEngine;

    #[tokio::test]
    async fn skips_without_failing() {
        let engine = LoggingScriptEngine::new();
        let bindings = ScriptBindings {
            record: json!({"id": 1}),
            value: None,
            context: json!({"event": "row_click"}),
        };

        let result = engine.run("console.log(record)", bindings).await;
        assert_eq!(result.ok(), Some(Value::Null));
    }
}
