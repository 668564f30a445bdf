use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use gridwire_domain::ResponseMapping;

use crate::json_path::nested_value;

/// The normalized page every response is mapped into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPage {
    /// Row records.
    pub data: Vec<Value>,
    /// Current logical page, 1-based.
    pub page: u64,
    /// Total page count.
    pub total_pages: u64,
    /// Total item count across all pages.
    pub total: u64,
}

impl NormalizedPage {
    /// Returns an empty first page.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            page: 1,
            total_pages: 1,
            total: 0,
        }
    }

    fn from_rows(data: Vec<Value>, page: u64, total_pages: u64, total: Option<u64>) -> Self {
        let total = total.unwrap_or(data.len() as u64);
        Self {
            data,
            page,
            total_pages,
            total,
        }
    }
}

/// Maps an arbitrary response body into a [`NormalizedPage`] using the
/// configured dot-paths.
///
/// This never fails: a shape mismatch degrades to an empty data set with a
/// warning so the table renders empty instead of crashing, and unset counter
/// paths fall back to their defaults (`page`/`totalPages` to 1, `total` to
/// the extracted data length).
#[must_use]
pub fn apply_mapping(body: &Value, mapping: &ResponseMapping) -> NormalizedPage {
    if !mapping.is_configured() {
        return map_unconfigured(body);
    }

    let data = match mapping.data_path() {
        Some(path) => match nested_value(body, path) {
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                warn!(
                    path = path,
                    found = found_kind(other),
                    "response data path did not resolve to an array, rendering empty"
                );
                Vec::new()
            }
            None => {
                warn!(path = path, "response data path resolved to nothing, rendering empty");
                Vec::new()
            }
        },
        None => match body {
            Value::Array(items) => items.clone(),
            _ => Vec::new(),
        },
    };

    let page = extract_count(body, mapping.current_page_path()).unwrap_or(1);
    let total_pages = extract_count(body, mapping.total_pages_path()).unwrap_or(1);
    let total = extract_count(body, mapping.total_items_path());

    NormalizedPage::from_rows(data, page, total_pages, total)
}

fn map_unconfigured(body: &Value) -> NormalizedPage {
    match body {
        Value::Array(items) => NormalizedPage::from_rows(items.clone(), 1, 1, None),
        Value::Object(_) => {
            let data = match nested_value(body, "data") {
                Some(Value::Array(items)) => items.clone(),
                _ => {
                    warn!("unmapped response object has no data array, rendering empty");
                    Vec::new()
                }
            };

            let page = extract_count(body, Some("page")).unwrap_or(1);
            let total_pages = extract_count(body, Some("totalPages")).unwrap_or(1);
            let total = extract_count(body, Some("total"));

            NormalizedPage::from_rows(data, page, total_pages, total)
        }
        _ => {
            warn!("unmapped response is not an array or object, rendering empty");
            NormalizedPage::empty()
        }
    }
}

fn extract_count(body: &Value, path: Option<&str>) -> Option<u64> {
    let value = nested_value(body, path?)?;
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|float| *float >= 0.0).map(|float| float as u64)),
        Value::String(content) => content.trim().parse().ok(),
        _ => None,
    }
}

fn found_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
