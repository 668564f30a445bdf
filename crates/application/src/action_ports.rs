use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use gridwire_core::TableResult;
use gridwire_domain::HttpMethod;

/// Request issued by an `api`-type click action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Interpolated endpoint URL.
    pub url: String,
    /// JSON body; the clicked record for POST/PUT/PATCH.
    pub body: Option<Value>,
}

/// Transport port for `api`-type click actions.
///
/// Implementations return the parsed response body on 2xx and
/// `TableError::HttpStatus` otherwise.
#[async_trait]
pub trait ActionHttpClient: Send + Sync {
    /// Executes the request.
    async fn execute(&self, request: ActionRequest) -> TableResult<Value>;
}

/// Navigation port; the host performs the actual page change.
pub trait Navigator: Send + Sync {
    /// Navigates to the given URL.
    fn navigate(&self, url: &str) -> TableResult<()>;
}

/// Clipboard port for `copy`-type actions.
pub trait Clipboard: Send + Sync {
    /// Writes text to the clipboard.
    fn write_text(&self, text: &str) -> TableResult<()>;
}

/// User confirmation port gating destructive `api` actions.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    /// Asks the user to confirm; `false` aborts the action.
    async fn confirm(&self, message: &str) -> TableResult<bool>;
}

/// Download port for `download`-type actions.
pub trait DownloadDelegate: Send + Sync {
    /// Starts a download of the given URL.
    fn download(&self, url: &str) -> TableResult<()>;
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Informational notice.
    Info,
    /// Something degraded but the table keeps working.
    Warning,
    /// A user-visible failure.
    Error,
}

/// User notification port; the host decides how notices are shown.
pub trait Notifier: Send + Sync {
    /// Surfaces a message to the user.
    fn notify(&self, level: NotificationLevel, message: &str);
}

/// The only bindings visible to user-authored script snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ScriptBindings {
    /// The clicked row record.
    pub record: Value,
    /// The clicked cell value, for cell-level handlers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Invocation context (action identifier, event kind).
    pub context: Value,
}

/// Sandboxed evaluator for user-authored script snippets.
///
/// Implementations expose exactly the [`ScriptBindings`] fields to the
/// script and nothing else; the executor catches every error.
#[async_trait]
pub trait ScriptEngine: Send + Sync {
    /// Runs the snippet with the given bindings.
    async fn run(&self, code: &str, bindings: ScriptBindings) -> TableResult<Value>;
}
