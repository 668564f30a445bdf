use std::collections::HashSet;

use gridwire_core::{Identifier, TableError, TableResult};
use serde::{Deserialize, Serialize};

/// Kind of table element an action is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// A cell button.
    Button,
    /// A cell icon.
    Icon,
    /// A rendered link.
    Link,
    /// Unspecified element.
    #[default]
    Default,
}

/// HTTP method for `api` actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET.
    #[default]
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the wire-format method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns whether the clicked record travels as the request body.
    #[must_use]
    pub fn sends_record_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

/// Behavior of one configured click action, dispatched on `actionType`.
///
/// Fields are optional on the wire; [`ActionBehavior::validate`] enforces the
/// type-specific required ones before an action is considered usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actionType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionBehavior {
    /// Navigates to an interpolated URL.
    Navigate {
        /// Target URL template with `{field}` placeholders.
        #[serde(default)]
        navigate_url: String,
    },
    /// Shows an informational dialog.
    Modal {
        /// Dialog title template.
        #[serde(default)]
        modal_title: String,
        /// Dialog content template.
        #[serde(default)]
        modal_content: String,
    },
    /// Calls a remote endpoint.
    Api {
        /// Endpoint URL template.
        #[serde(default)]
        api_endpoint: String,
        /// HTTP method.
        #[serde(default)]
        api_method: HttpMethod,
        /// Confirmation prompt shown before the call fires; empty disables it.
        #[serde(default)]
        api_confirm_message: String,
    },
    /// Copies one record field to the clipboard.
    Copy {
        /// Record field to copy.
        #[serde(default)]
        copy_field: String,
    },
    /// Triggers a browser download.
    Download {
        /// Download URL template.
        #[serde(default)]
        download_url: String,
    },
    /// Runs a user-authored script snippet.
    Javascript {
        /// Script source; `record` and `context` are the only bindings.
        #[serde(default)]
        javascript_code: String,
    },
}

impl ActionBehavior {
    /// Returns the stable wire value of the action type.
    #[must_use]
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Modal { .. } => "modal",
            Self::Api { .. } => "api",
            Self::Copy { .. } => "copy",
            Self::Download { .. } => "download",
            Self::Javascript { .. } => "javascript",
        }
    }

    /// Enforces the type-specific required fields.
    pub fn validate(&self) -> TableResult<()> {
        match self {
            Self::Navigate { navigate_url } => {
                Self::require("navigate", "navigateUrl", navigate_url)
            }
            Self::Modal { modal_title, .. } => Self::require("modal", "modalTitle", modal_title),
            Self::Api { api_endpoint, .. } => Self::require("api", "apiEndpoint", api_endpoint),
            Self::Copy { copy_field } => Self::require("copy", "copyField", copy_field),
            Self::Download { download_url } => {
                Self::require("download", "downloadUrl", download_url)
            }
            Self::Javascript { javascript_code } => {
                Self::require("javascript", "javascriptCode", javascript_code)
            }
        }
    }

    fn require(action_type: &str, field: &str, value: &str) -> TableResult<()> {
        if value.trim().is_empty() {
            return Err(TableError::Config(format!(
                "{action_type} action requires {field}"
            )));
        }

        Ok(())
    }
}

/// A named, reusable click behavior attachable to buttons, icons, or rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickAction {
    /// Unique identifier referenced from column rules and row-click config.
    pub identifier: String,
    /// Element kind this action was designed for.
    #[serde(default)]
    pub element_type: ElementType,
    /// Action behavior and its type-specific fields.
    #[serde(flatten)]
    pub behavior: ActionBehavior,
}

impl ClickAction {
    /// Checks identifier shape and required behavior fields.
    pub fn validate(&self) -> TableResult<()> {
        Identifier::new(self.identifier.as_str())?;
        self.behavior.validate()
    }
}

/// How a row click is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RowClickMode {
    /// Runs the selected click action.
    #[default]
    Action,
    /// Runs the configured custom code.
    Custom,
}

/// Row click configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RowClickConfig {
    /// Whether rows react to clicks.
    pub enabled: bool,
    /// Identifier of the action to run in `action` mode.
    pub selected_action: String,
    /// Row click interpretation mode.
    pub mode: RowClickMode,
    /// Script run in `custom` mode.
    pub custom_code: String,
}

/// Event configuration of one table: click actions plus legacy handler code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EventsConfig {
    /// Legacy row click handler code.
    pub on_row_click: Option<String>,
    /// Legacy button click handler code.
    pub on_button_click: Option<String>,
    /// Legacy icon click handler code.
    pub on_icon_click: Option<String>,
    /// Reusable click actions referenced by identifier.
    pub click_actions: Vec<ClickAction>,
    /// Row click behavior.
    pub row_click: RowClickConfig,
}

impl EventsConfig {
    /// Finds a click action by identifier.
    #[must_use]
    pub fn find_action(&self, identifier: &str) -> Option<&ClickAction> {
        self.click_actions
            .iter()
            .find(|action| action.identifier == identifier)
    }

    /// Validates every action and the identifier uniqueness invariant.
    pub fn validate(&self) -> TableResult<()> {
        let mut seen = HashSet::new();
        for action in &self.click_actions {
            action.validate()?;
            if !seen.insert(action.identifier.as_str()) {
                return Err(TableError::Config(format!(
                    "duplicate click action identifier '{}'",
                    action.identifier
                )));
            }
        }

        Ok(())
    }
}
