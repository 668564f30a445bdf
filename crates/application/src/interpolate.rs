use serde_json::Value;

/// Substitutes `{field}` placeholders in a template with record field values.
///
/// Placeholders whose field is absent from the record stay verbatim, so a
/// partial interpolation is visible in the output instead of silently blank.
#[must_use]
pub fn interpolate(template: &str, record: &Value) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let (head, after_head) = rest.split_at(start);
        result.push_str(head);

        let Some(end_relative) = after_head.find('}') else {
            result.push_str(after_head);
            return result;
        };

        let field = &after_head[1..end_relative];
        match record.get(field) {
            Some(value) => result.push_str(value_to_string(value).as_str()),
            None => result.push_str(&after_head[..=end_relative]),
        }

        rest = &after_head[end_relative + 1..];
    }

    result.push_str(rest);
    result
}

/// Like [`interpolate`], with a missing template rendering as empty.
#[must_use]
pub fn interpolate_opt(template: Option<&str>, record: &Value) -> String {
    template
        .map(|template| interpolate(template, record))
        .unwrap_or_default()
}

/// Renders a JSON value as a bare display string: strings unquoted, scalars
/// via display, arrays and objects as JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(content) => content.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
