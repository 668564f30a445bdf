//! Console navigator for headless hosts. Logs navigation intents.

use gridwire_application::Navigator;
use gridwire_core::TableResult;
use tracing::info;

/// Development navigator that logs where a browser host would go.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNavigator;

impl ConsoleNavigator {
    /// Creates a new console navigator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, url: &str) -> TableResult<()> {
        info!(url = url, "navigation requested");
        Ok(())
    }
}
