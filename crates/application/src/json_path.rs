use serde_json::Value;

/// Resolves a dot-path inside a JSON value.
///
/// An empty path returns the root. Segments address object keys, and decimal
/// segments additionally index into arrays. Any miss along the way resolves
/// to `None`; this never panics.
#[must_use]
pub fn nested_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }

        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}
