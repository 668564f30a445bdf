use serde::{Deserialize, Serialize};

/// Dot-paths locating the data array and pagination counters inside an
/// arbitrary response body. An empty path means "unset".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseMapping {
    data_path: String,
    current_page: String,
    total_pages: String,
    total_items: String,
}

impl ResponseMapping {
    /// Creates a mapping from the four configured dot-paths; empty strings
    /// leave the corresponding field unset.
    pub fn new(
        data_path: impl Into<String>,
        current_page: impl Into<String>,
        total_pages: impl Into<String>,
        total_items: impl Into<String>,
    ) -> Self {
        Self {
            data_path: data_path.into(),
            current_page: current_page.into(),
            total_pages: total_pages.into(),
            total_items: total_items.into(),
        }
    }

    fn normalized(path: &str) -> Option<&str> {
        let trimmed = path.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Returns the dot-path of the data array, when configured.
    #[must_use]
    pub fn data_path(&self) -> Option<&str> {
        Self::normalized(&self.data_path)
    }

    /// Returns the dot-path of the current page number, when configured.
    #[must_use]
    pub fn current_page_path(&self) -> Option<&str> {
        Self::normalized(&self.current_page)
    }

    /// Returns the dot-path of the total page count, when configured.
    #[must_use]
    pub fn total_pages_path(&self) -> Option<&str> {
        Self::normalized(&self.total_pages)
    }

    /// Returns the dot-path of the total item count, when configured.
    #[must_use]
    pub fn total_items_path(&self) -> Option<&str> {
        Self::normalized(&self.total_items)
    }

    /// Returns whether any path is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.data_path().is_some()
            || self.current_page_path().is_some()
            || self.total_pages_path().is_some()
            || self.total_items_path().is_some()
    }
}
