//! Console notifier for development. Routes notifications to tracing output.

use gridwire_application::{NotificationLevel, Notifier};
use tracing::{error, info, warn};

/// Development notifier that writes notifications to the console.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Creates a new console notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Info => info!(message = message, "notification"),
            NotificationLevel::Warning => warn!(message = message, "notification"),
            NotificationLevel::Error => error!(message = message, "notification"),
        }
    }
}
