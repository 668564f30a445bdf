use gridwire_core::{TableError, TableResult};
use serde::{Deserialize, Serialize};

/// What happens when a response status matches a handler rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorHandlerAction {
    /// Surface the configured message to the user.
    Alert,
    /// Navigate to the configured redirect URL.
    Redirect,
    /// Log the message, nothing user-visible.
    Log,
}

/// One configured HTTP error handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHandlerRule {
    /// Decimal status code string as entered in the builder.
    pub status: String,
    /// Message shown or logged when the rule fires.
    #[serde(default)]
    pub message: String,
    /// Reaction kind.
    pub action: ErrorHandlerAction,
    /// Target for `redirect` rules.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl ErrorHandlerRule {
    /// Returns whether this rule handles the given response status.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        self.status
            .trim()
            .parse::<u16>()
            .is_ok_and(|configured| configured == status)
    }

    /// Checks the rule for validity.
    pub fn validate(&self) -> TableResult<()> {
        if self.status.trim().parse::<u16>().is_err() {
            return Err(TableError::Config(format!(
                "error handler status '{}' is not a status code",
                self.status
            )));
        }

        if matches!(self.action, ErrorHandlerAction::Redirect)
            && self
                .redirect_url
                .as_deref()
                .is_none_or(|url| url.trim().is_empty())
        {
            return Err(TableError::Config(format!(
                "error handler for status {} requires a redirectUrl",
                self.status
            )));
        }

        Ok(())
    }
}
