use std::sync::Mutex;

use gridwire_application::Clipboard;
use gridwire_core::{TableError, TableResult};

/// In-memory clipboard for development and tests; keeps the last write.
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    content: Mutex<Option<String>>,
}

impl InMemoryClipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last written text.
    #[must_use]
    pub fn last_copied(&self) -> Option<String> {
        self.content.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Clipboard for InMemoryClipboard {
    fn write_text(&self, text: &str) -> TableResult<()> {
        let mut slot = self
            .content
            .lock()
            .map_err(|_| TableError::Internal("clipboard lock poisoned".to_owned()))?;
        *slot = Some(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gridwire_application::Clipboard;

    use super::InMemoryClipboard;

    #[test]
    fn keeps_the_last_write() {
        let clipboard = InMemoryClipboard::new();
        assert_eq!(clipboard.last_copied(), None);

        let result = clipboard.write_text("first");
        assert!(result.is_ok());
        let result = clipboard.write_text("second");
        assert!(result.is_ok());

        assert_eq!(clipboard.last_copied(), Some("second".to_owned()));
    }
}
