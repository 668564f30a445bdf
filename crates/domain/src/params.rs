use serde::{Deserialize, Serialize};

/// Symbolic tag binding a query param to the runtime trigger that drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamReference {
    /// Updated when the user moves to another page.
    PageChange,
    /// Updated when the user picks another page size.
    PageSizeChange,
    /// Updated when the sort column changes.
    SortField,
    /// Updated when the sort direction changes.
    SortOrder,
    /// Never updated at runtime; the configured value is used as-is.
    #[default]
    Static,
}

/// A named placeholder substituted into the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParam {
    /// Placeholder name as it appears in the path template.
    pub name: String,
    /// Substituted value.
    #[serde(default)]
    pub value: String,
    /// Disabled params leave their placeholder untouched.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

/// A query-string parameter with an optional runtime trigger binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// Parameter name.
    pub name: String,
    /// Statically configured value, overridden by dynamic values at runtime.
    #[serde(default)]
    pub value: String,
    /// Disabled params are excluded from the query string.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    /// Runtime trigger binding.
    #[serde(default)]
    pub reference: ParamReference,
}

fn enabled_default() -> bool {
    true
}
