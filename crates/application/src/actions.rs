use std::sync::Arc;

use serde_json::{Value, json};
use tracing::warn;

use gridwire_domain::{ActionBehavior, ClickAction, HttpMethod};

use crate::action_ports::{
    ActionHttpClient, ActionRequest, Clipboard, ConfirmationGate, DownloadDelegate, Navigator,
    ScriptBindings, ScriptEngine,
};
use crate::interpolate::{interpolate, value_to_string};

/// What executing a click action produced.
///
/// Side effects run through the injected ports; when a port is absent the
/// executor degrades to a `*Requested` intent the host can fulfill itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The navigator performed the navigation.
    Navigated {
        /// Interpolated target URL.
        url: String,
    },
    /// No navigator port; the host should redirect to this URL.
    NavigationRequested {
        /// Interpolated target URL.
        url: String,
    },
    /// The host should show an informational dialog.
    ModalRequested {
        /// Interpolated dialog title.
        title: String,
        /// Interpolated dialog content.
        content: String,
    },
    /// The remote call succeeded.
    ApiCompleted {
        /// Parsed response body.
        body: Value,
    },
    /// The user declined the confirmation prompt; nothing fired.
    ApiDeclined,
    /// The field value was written to the clipboard.
    Copied {
        /// Copied text.
        text: String,
    },
    /// The copy field is missing from the record; nothing was copied.
    CopyFieldMissing {
        /// Configured field name.
        field: String,
    },
    /// The download delegate started the download.
    DownloadStarted {
        /// Interpolated download URL.
        url: String,
    },
    /// No download port; the host should download this URL.
    DownloadRequested {
        /// Interpolated download URL.
        url: String,
    },
    /// The user script ran to completion.
    ScriptCompleted,
    /// A registered named handler was invoked.
    HandlerInvoked {
        /// Handler name.
        name: String,
    },
    /// Nothing was configured to run; the click was ignored.
    Ignored,
    /// The action failed; already logged, never propagated.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// Executes configured click actions against a row record.
///
/// Every port is optional; execution is infallible from the caller's view.
#[derive(Clone, Default)]
pub struct ActionExecutor {
    http_client: Option<Arc<dyn ActionHttpClient>>,
    navigator: Option<Arc<dyn Navigator>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    confirmation: Option<Arc<dyn ConfirmationGate>>,
    script_engine: Option<Arc<dyn ScriptEngine>>,
    downloads: Option<Arc<dyn DownloadDelegate>>,
}

impl ActionExecutor {
    /// Creates an executor with no ports attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the HTTP client used by `api` actions.
    #[must_use]
    pub fn with_http_client(mut self, http_client: Arc<dyn ActionHttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Attaches the navigation port.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Attaches the clipboard port.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Attaches the confirmation gate.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: Arc<dyn ConfirmationGate>) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    /// Attaches the script engine.
    #[must_use]
    pub fn with_script_engine(mut self, script_engine: Arc<dyn ScriptEngine>) -> Self {
        self.script_engine = Some(script_engine);
        self
    }

    /// Attaches the download delegate.
    #[must_use]
    pub fn with_downloads(mut self, downloads: Arc<dyn DownloadDelegate>) -> Self {
        self.downloads = Some(downloads);
        self
    }

    /// Runs one click action against a record.
    ///
    /// Malformed actions are not re-validated up front; a missing field
    /// no-ops or fails at its point of use, logged and contained.
    pub async fn execute(&self, action: &ClickAction, record: &Value) -> ActionOutcome {
        match &action.behavior {
            ActionBehavior::Navigate { navigate_url } => self.navigate(navigate_url, record),
            ActionBehavior::Modal {
                modal_title,
                modal_content,
            } => ActionOutcome::ModalRequested {
                title: interpolate(modal_title, record),
                content: interpolate(modal_content, record),
            },
            ActionBehavior::Api {
                api_endpoint,
                api_method,
                api_confirm_message,
            } => {
                self.call_api(action, api_endpoint, *api_method, api_confirm_message, record)
                    .await
            }
            ActionBehavior::Copy { copy_field } => self.copy(action, copy_field, record),
            ActionBehavior::Download { download_url } => self.download(download_url, record),
            ActionBehavior::Javascript { javascript_code } => {
                self.run_script(action, javascript_code, record).await
            }
        }
    }

    fn navigate(&self, navigate_url: &str, record: &Value) -> ActionOutcome {
        let url = interpolate(navigate_url, record);
        if url.trim().is_empty() {
            return Self::failed("navigate action has no URL");
        }

        match &self.navigator {
            Some(navigator) => match navigator.navigate(url.as_str()) {
                Ok(()) => ActionOutcome::Navigated { url },
                Err(error) => Self::failed(format!("navigation to '{url}' failed: {error}")),
            },
            None => ActionOutcome::NavigationRequested { url },
        }
    }

    async fn call_api(
        &self,
        action: &ClickAction,
        api_endpoint: &str,
        api_method: HttpMethod,
        api_confirm_message: &str,
        record: &Value,
    ) -> ActionOutcome {
        let url = interpolate(api_endpoint, record);
        if url.trim().is_empty() {
            return Self::failed(format!("api action '{}' has no endpoint", action.identifier));
        }

        let confirm_message = api_confirm_message.trim();
        if !confirm_message.is_empty() {
            let Some(gate) = &self.confirmation else {
                warn!(
                    action = action.identifier,
                    "api action requires confirmation but no gate is configured; declining"
                );
                return ActionOutcome::ApiDeclined;
            };

            match gate.confirm(interpolate(confirm_message, record).as_str()).await {
                Ok(true) => {}
                Ok(false) => return ActionOutcome::ApiDeclined,
                Err(error) => {
                    return Self::failed(format!(
                        "confirmation for action '{}' failed: {error}",
                        action.identifier
                    ));
                }
            }
        }

        let Some(client) = &self.http_client else {
            return Self::failed(format!(
                "api action '{}' has no HTTP client configured",
                action.identifier
            ));
        };

        let body = api_method.sends_record_body().then(|| record.clone());
        match client
            .execute(ActionRequest {
                method: api_method,
                url,
                body,
            })
            .await
        {
            Ok(body) => ActionOutcome::ApiCompleted { body },
            Err(error) => Self::failed(format!(
                "api action '{}' failed: {error}",
                action.identifier
            )),
        }
    }

    fn copy(&self, action: &ClickAction, copy_field: &str, record: &Value) -> ActionOutcome {
        let field = copy_field.trim();
        match record.get(field) {
            None | Some(Value::Null) => {
                warn!(
                    action = action.identifier,
                    field = field,
                    "copy field not found on record"
                );
                ActionOutcome::CopyFieldMissing {
                    field: field.to_owned(),
                }
            }
            Some(value) => {
                let text = value_to_string(value);
                let Some(clipboard) = &self.clipboard else {
                    return Self::failed(format!(
                        "copy action '{}' has no clipboard configured",
                        action.identifier
                    ));
                };

                match clipboard.write_text(text.as_str()) {
                    Ok(()) => ActionOutcome::Copied { text },
                    Err(error) => Self::failed(format!(
                        "copy action '{}' failed: {error}",
                        action.identifier
                    )),
                }
            }
        }
    }

    fn download(&self, download_url: &str, record: &Value) -> ActionOutcome {
        let url = interpolate(download_url, record);
        if url.trim().is_empty() {
            return Self::failed("download action has no URL");
        }

        match &self.downloads {
            Some(downloads) => match downloads.download(url.as_str()) {
                Ok(()) => ActionOutcome::DownloadStarted { url },
                Err(error) => Self::failed(format!("download of '{url}' failed: {error}")),
            },
            None => ActionOutcome::DownloadRequested { url },
        }
    }

    async fn run_script(
        &self,
        action: &ClickAction,
        javascript_code: &str,
        record: &Value,
    ) -> ActionOutcome {
        let Some(engine) = &self.script_engine else {
            return Self::failed(format!(
                "javascript action '{}' has no script engine configured",
                action.identifier
            ));
        };

        let bindings = ScriptBindings {
            record: record.clone(),
            value: None,
            context: json!({"identifier": action.identifier}),
        };

        match engine.run(javascript_code, bindings).await {
            Ok(_) => ActionOutcome::ScriptCompleted,
            Err(error) => Self::failed(format!(
                "javascript action '{}' threw: {error}",
                action.identifier
            )),
        }
    }

    fn failed(message: impl Into<String>) -> ActionOutcome {
        let message = message.into();
        warn!(message = message.as_str(), "click action failed");
        ActionOutcome::Failed { message }
    }
}
