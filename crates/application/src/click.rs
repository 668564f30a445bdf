use std::sync::Arc;

use serde_json::{Value, json};
use tracing::warn;

use gridwire_domain::{EventsConfig, RowClickMode};

use crate::action_ports::{ScriptBindings, ScriptEngine};
use crate::actions::{ActionExecutor, ActionOutcome};
use crate::registry::FunctionRegistry;
use crate::render::ResolvedClick;

/// Runs resolved cell clicks and configured row clicks.
///
/// Cell and row dispatch are separate entry points on purpose: dispatching a
/// button or icon click never also runs the row click, which is the
/// stop-propagation contract the presentation layer relies on.
#[derive(Clone)]
pub struct ClickDispatcher {
    executor: Arc<ActionExecutor>,
    script_engine: Option<Arc<dyn ScriptEngine>>,
    functions: FunctionRegistry,
}

impl ClickDispatcher {
    /// Creates a dispatcher around an action executor.
    #[must_use]
    pub fn new(executor: Arc<ActionExecutor>) -> Self {
        Self {
            executor,
            script_engine: None,
            functions: FunctionRegistry::new(),
        }
    }

    /// Attaches the script engine used for custom handler code.
    #[must_use]
    pub fn with_script_engine(mut self, script_engine: Arc<dyn ScriptEngine>) -> Self {
        self.script_engine = Some(script_engine);
        self
    }

    /// Attaches the named handler registry.
    #[must_use]
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    /// Runs one resolved button or icon click against a record.
    pub async fn dispatch(
        &self,
        click: &ResolvedClick,
        record: &Value,
        value: &Value,
    ) -> ActionOutcome {
        match click {
            ResolvedClick::Action(action) => self.executor.execute(action, record).await,
            ResolvedClick::Handler(code) => {
                self.run_handler_code(code.as_str(), record, Some(value.clone()), "cell_click")
                    .await
            }
            ResolvedClick::Registered(name) => match self.functions.get(name.as_str()) {
                Some(handler) => {
                    handler(record, value);
                    ActionOutcome::HandlerInvoked { name: name.clone() }
                }
                None => {
                    warn!(name = name.as_str(), "named click handler disappeared from registry");
                    ActionOutcome::Ignored
                }
            },
            ResolvedClick::Unresolved { action_id } => {
                warn!(
                    action_id = action_id.as_str(),
                    "click resolved to nothing; ignoring"
                );
                ActionOutcome::Ignored
            }
        }
    }

    /// Runs the configured row click against a record.
    pub async fn dispatch_row_click(
        &self,
        events: &EventsConfig,
        record: &Value,
    ) -> ActionOutcome {
        let row_click = &events.row_click;

        if row_click.enabled {
            return match row_click.mode {
                RowClickMode::Action => {
                    let identifier = row_click.selected_action.as_str();
                    match events.find_action(identifier) {
                        Some(action) => self.executor.execute(action, record).await,
                        None => {
                            warn!(
                                identifier = identifier,
                                "row click points at a missing action; ignoring"
                            );
                            ActionOutcome::Ignored
                        }
                    }
                }
                RowClickMode::Custom => {
                    self.run_handler_code(
                        row_click.custom_code.as_str(),
                        record,
                        None,
                        "row_click",
                    )
                    .await
                }
            };
        }

        if let Some(code) = events.on_row_click.as_deref()
            && !code.trim().is_empty()
        {
            return self.run_handler_code(code, record, None, "row_click").await;
        }

        ActionOutcome::Ignored
    }

    async fn run_handler_code(
        &self,
        code: &str,
        record: &Value,
        value: Option<Value>,
        event: &str,
    ) -> ActionOutcome {
        if code.trim().is_empty() {
            warn!(event = event, "empty handler code; ignoring");
            return ActionOutcome::Ignored;
        }

        let Some(engine) = &self.script_engine else {
            warn!(event = event, "handler code configured but no script engine attached");
            return ActionOutcome::Failed {
                message: "no script engine configured for handler code".to_owned(),
            };
        };

        let bindings = ScriptBindings {
            record: record.clone(),
            value,
            context: json!({"event": event}),
        };

        match engine.run(code, bindings).await {
            Ok(_) => ActionOutcome::ScriptCompleted,
            Err(error) => {
                warn!(event = event, error = %error, "handler code threw");
                ActionOutcome::Failed {
                    message: format!("handler code threw: {error}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tokio::sync::Mutex;

    use gridwire_core::TableResult;
    use gridwire_domain::{
        ActionBehavior, ClickAction, ElementType, EventsConfig, RowClickConfig, RowClickMode,
    };

    use super::ClickDispatcher;
    use crate::action_ports::{ScriptBindings, ScriptEngine};
    use crate::actions::{ActionExecutor, ActionOutcome};
    use crate::registry::FunctionRegistry;
    use crate::render::ResolvedClick;

    #[derive(Default)]
    struct RecordingEngine {
        runs: Mutex<Vec<(String, ScriptBindings)>>,
    }

    #[async_trait]
    impl ScriptEngine for RecordingEngine {
        async fn run(&self, code: &str, bindings: ScriptBindings) -> TableResult<Value> {
            self.runs.lock().await.push((code.to_owned(), bindings));
            Ok(Value::Null)
        }
    }

    fn navigate_action(identifier: &str) -> ClickAction {
        ClickAction {
            identifier: identifier.to_owned(),
            element_type: ElementType::Button,
            behavior: ActionBehavior::Navigate {
                navigate_url: "/records/{id}".to_owned(),
            },
        }
    }

    #[tokio::test]
    async fn action_click_runs_through_the_executor() {
        let dispatcher = ClickDispatcher::new(Arc::new(ActionExecutor::new()));
        let click = ResolvedClick::Action(navigate_action("open"));

        let outcome = dispatcher.dispatch(&click, &json!({"id": 4}), &json!(null)).await;
        assert_eq!(
            outcome,
            ActionOutcome::NavigationRequested {
                url: "/records/4".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn matched_action_never_reaches_the_registered_fallback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut functions = FunctionRegistry::new();
        functions.register("open", Arc::new(move |_record, _value| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let dispatcher =
            ClickDispatcher::new(Arc::new(ActionExecutor::new())).with_functions(functions);

        // The click already resolved to the configured action, so the
        // same-named registered function must stay untouched.
        let click = ResolvedClick::Action(navigate_action("open"));
        let outcome = dispatcher.dispatch(&click, &json!({"id": 1}), &json!(null)).await;

        assert!(matches!(outcome, ActionOutcome::NavigationRequested { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn handler_code_receives_record_value_and_event() {
        let engine = Arc::new(RecordingEngine::default());
        let dispatcher = ClickDispatcher::new(Arc::new(ActionExecutor::new()))
            .with_script_engine(engine.clone());

        let click = ResolvedClick::Handler("console.log(record)".to_owned());
        let outcome = dispatcher
            .dispatch(&click, &json!({"id": 2}), &json!("active"))
            .await;

        assert_eq!(outcome, ActionOutcome::ScriptCompleted);
        let runs = engine.runs.lock().await;
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].1.record, json!({"id": 2}));
        assert_eq!(runs[0].1.value, Some(json!("active")));
        assert_eq!(runs[0].1.context, json!({"event": "cell_click"}));
    }

    #[tokio::test]
    async fn registered_function_is_invoked_with_record_and_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut functions = FunctionRegistry::new();
        functions.register("legacy_open", Arc::new(move |_record, _value| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let dispatcher =
            ClickDispatcher::new(Arc::new(ActionExecutor::new())).with_functions(functions);

        let click = ResolvedClick::Registered("legacy_open".to_owned());
        let outcome = dispatcher.dispatch(&click, &json!({}), &json!(null)).await;

        assert_eq!(
            outcome,
            ActionOutcome::HandlerInvoked {
                name: "legacy_open".to_owned(),
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unresolved_click_is_ignored() {
        let dispatcher = ClickDispatcher::new(Arc::new(ActionExecutor::new()));
        let click = ResolvedClick::Unresolved {
            action_id: "deleted".to_owned(),
        };

        let outcome = dispatcher.dispatch(&click, &json!({}), &json!(null)).await;
        assert_eq!(outcome, ActionOutcome::Ignored);
    }

    #[tokio::test]
    async fn row_click_in_action_mode_runs_the_selected_action() {
        let events = EventsConfig {
            click_actions: vec![navigate_action("open_row")],
            row_click: RowClickConfig {
                enabled: true,
                selected_action: "open_row".to_owned(),
                mode: RowClickMode::Action,
                custom_code: String::new(),
            },
            ..EventsConfig::default()
        };

        let dispatcher = ClickDispatcher::new(Arc::new(ActionExecutor::new()));
        let outcome = dispatcher.dispatch_row_click(&events, &json!({"id": 11})).await;

        assert_eq!(
            outcome,
            ActionOutcome::NavigationRequested {
                url: "/records/11".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn row_click_with_missing_action_is_ignored() {
        let events = EventsConfig {
            row_click: RowClickConfig {
                enabled: true,
                selected_action: "ghost".to_owned(),
                mode: RowClickMode::Action,
                custom_code: String::new(),
            },
            ..EventsConfig::default()
        };

        let dispatcher = ClickDispatcher::new(Arc::new(ActionExecutor::new()));
        let outcome = dispatcher.dispatch_row_click(&events, &json!({})).await;
        assert_eq!(outcome, ActionOutcome::Ignored);
    }

    #[tokio::test]
    async fn disabled_row_click_falls_back_to_legacy_handler() {
        let engine = Arc::new(RecordingEngine::default());
        let events = EventsConfig {
            on_row_click: Some("openDetails(record)".to_owned()),
            ..EventsConfig::default()
        };

        let dispatcher = ClickDispatcher::new(Arc::new(ActionExecutor::new()))
            .with_script_engine(engine.clone());
        let outcome = dispatcher.dispatch_row_click(&events, &json!({"id": 3})).await;

        assert_eq!(outcome, ActionOutcome::ScriptCompleted);
        assert_eq!(engine.runs.lock().await.len(), 1);
    }
}
