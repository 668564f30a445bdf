//! Confirmation gate with a fixed policy, for headless hosts.

use async_trait::async_trait;
use tracing::info;

use gridwire_application::ConfirmationGate;
use gridwire_core::TableResult;

/// Answers every confirmation prompt with a preconfigured decision.
///
/// Headless hosts have nobody to ask; an action that requires confirmation
/// must still not fire unless something approved it, so the safe default is
/// [`StaticConfirmationGate::declining`].
#[derive(Debug, Clone)]
pub struct StaticConfirmationGate {
    approve: bool,
}

impl StaticConfirmationGate {
    /// Creates a gate that approves every prompt.
    #[must_use]
    pub fn approving() -> Self {
        Self { approve: true }
    }

    /// Creates a gate that declines every prompt.
    #[must_use]
    pub fn declining() -> Self {
        Self { approve: false }
    }
}

#[async_trait]
impl ConfirmationGate for StaticConfirmationGate {
    async fn confirm(&self, message: &str) -> TableResult<bool> {
        info!(
            message = message,
            approved = self.approve,
            "confirmation prompt answered by policy"
        );
        Ok(self.approve)
    }
}
