use gridwire_core::{TableError, TableResult};
use serde::{Deserialize, Serialize};

/// Start-index convention of the remote API: whether its first page is 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum PageOrigin {
    /// Logical page 1 is encoded as `0`.
    Zero,
    /// Logical page 1 is encoded as `1`.
    #[default]
    One,
}

impl TryFrom<u8> for PageOrigin {
    type Error = TableError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            other => Err(TableError::Config(format!(
                "startFrom must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl From<PageOrigin> for u8 {
    fn from(value: PageOrigin) -> Self {
        match value {
            PageOrigin::Zero => 0,
            PageOrigin::One => 1,
        }
    }
}

/// How logical page numbers translate into provider query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationConfig {
    /// Whether pagination parameters are sent at all.
    pub enabled: bool,
    /// Query parameter carrying the encoded page number.
    pub page_number_param: String,
    /// Query parameter carrying the page size.
    pub page_size_param: String,
    /// Page size used before the user picks one.
    pub default_page_size: u64,
    /// Start-index convention of the provider.
    #[serde(rename = "startFrom")]
    pub start_from: PageOrigin,
    /// Page sizes offered by the size changer.
    pub page_size_options: Vec<u64>,
    /// Whether the size changer is shown.
    pub show_size_changer: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            page_number_param: "page".to_owned(),
            page_size_param: "pageSize".to_owned(),
            default_page_size: 10,
            start_from: PageOrigin::One,
            page_size_options: vec![10, 20, 50, 100],
            show_size_changer: true,
        }
    }
}

impl PaginationConfig {
    /// Checks the pagination settings for internal consistency.
    pub fn validate(&self) -> TableResult<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.default_page_size == 0 {
            return Err(TableError::Config(
                "pagination defaultPageSize must be greater than zero".to_owned(),
            ));
        }

        if self.page_number_param.trim().is_empty() || self.page_size_param.trim().is_empty() {
            return Err(TableError::Config(
                "pagination requires pageNumberParam and pageSizeParam names".to_owned(),
            ));
        }

        Ok(())
    }
}
