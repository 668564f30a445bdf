use serde_json::{Map, Value};
use url::form_urlencoded;

use gridwire_core::TableResult;
use gridwire_domain::{
    ApiConnectionConfig, HttpMethod, PageOrigin, PaginationConfig, PathParam, QueryParam,
    TableConfig,
};

use crate::dynamic_params::DynamicValueMap;

/// A fully built outbound request, ready for a transport adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL, query string included.
    pub url: String,
    /// Ordered request headers.
    pub headers: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

/// Substitutes enabled path params into a path template.
///
/// Both placeholder syntaxes are supported: `{name}` is replaced wherever it
/// appears, `:name` only when followed by `/` or the end of the path, so a
/// shorter param name never swallows part of a longer placeholder. Params
/// that are disabled or have no value leave their placeholder untouched.
#[must_use]
pub fn interpolate_path_params(path: &str, params: &[PathParam]) -> String {
    let mut result = path.to_owned();

    for param in params {
        if !param.enabled || param.value.is_empty() || param.name.is_empty() {
            continue;
        }

        let braced = format!("{{{}}}", param.name);
        result = result.replace(braced.as_str(), param.value.as_str());
        result = replace_colon_param(result.as_str(), param.name.as_str(), param.value.as_str());
    }

    result
}

fn replace_colon_param(path: &str, name: &str, value: &str) -> String {
    let needle = format!(":{name}");
    let mut result = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(start) = rest.find(needle.as_str()) {
        let after = start + needle.len();
        let at_boundary = rest[after..].chars().next().is_none_or(|next| next == '/');

        if at_boundary {
            result.push_str(&rest[..start]);
            result.push_str(value);
        } else {
            result.push_str(&rest[..after]);
        }

        rest = &rest[after..];
    }

    result.push_str(rest);
    result
}

/// Lists placeholders still present in an interpolated path.
///
/// This is an advisory check for the builder UI; leftover placeholders are
/// not an error during URL construction.
#[must_use]
pub fn unresolved_placeholders(path: &str) -> Vec<String> {
    let mut found = Vec::new();

    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };

        let name = &after[..end];
        if !name.is_empty() && !name.contains('{') {
            found.push(name.to_owned());
        }

        rest = &after[end + 1..];
    }

    for (index, _) in path.match_indices(':') {
        let tail = &path[index + 1..];
        let name_end = tail
            .find(|next: char| !next.is_ascii_alphanumeric() && next != '_')
            .unwrap_or(tail.len());
        let name = &tail[..name_end];
        let at_boundary = tail[name_end..].is_empty() || tail[name_end..].starts_with('/');

        if !name.is_empty() && at_boundary {
            found.push(name.to_owned());
        }
    }

    found
}

/// Builds the query string from enabled params, dynamic values taking
/// precedence over the statically configured ones.
///
/// Params keep their configured order; a duplicated enabled name silently
/// overwrites the earlier value. Keys and values are percent-encoded, and a
/// param without a value encodes as `name=`.
#[must_use]
pub fn build_query_string(params: &[QueryParam], dynamic_values: &DynamicValueMap) -> String {
    let mut ordered: Vec<(String, String)> = Vec::new();

    for param in params {
        let name = param.name.trim();
        if !param.enabled || name.is_empty() {
            continue;
        }

        let value = dynamic_values
            .get(name)
            .map(String::as_str)
            .unwrap_or(param.value.as_str())
            .to_owned();

        match ordered.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_value)) => *existing_value = value,
            None => ordered.push((name.to_owned(), value)),
        }
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in &ordered {
        serializer.append_pair(name.as_str(), value.as_str());
    }

    serializer.finish()
}

/// Builds the full request URL for a table data load.
///
/// Deterministic: identical inputs always produce the identical string.
pub fn build_api_url(
    api: &ApiConnectionConfig,
    path_params: &[PathParam],
    query_params: &[QueryParam],
    dynamic_values: &DynamicValueMap,
) -> TableResult<String> {
    api.validate()?;

    let base = api.base_url.trim().trim_end_matches('/');
    let path = interpolate_path_params(api.path.as_str(), path_params);
    let path = path.trim();

    let mut url = base.to_owned();
    if !path.is_empty() {
        url.push('/');
        url.push_str(path.trim_start_matches('/'));
    }

    let query = build_query_string(query_params, dynamic_values);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query.as_str());
    }

    Ok(url)
}

/// Encodes a logical `(page, page_size)` pair as a query fragment, honoring
/// the provider's start-index convention. Empty when pagination is disabled.
#[must_use]
pub fn build_pagination_params(pagination: &PaginationConfig, page: u64, page_size: u64) -> String {
    if !pagination.enabled {
        return String::new();
    }

    let encoded_page = match pagination.start_from {
        PageOrigin::Zero => page.saturating_sub(1),
        PageOrigin::One => page,
    };

    form_urlencoded::Serializer::new(String::new())
        .append_pair(
            pagination.page_number_param.as_str(),
            encoded_page.to_string().as_str(),
        )
        .append_pair(
            pagination.page_size_param.as_str(),
            page_size.to_string().as_str(),
        )
        .finish()
}

/// Appends an already-encoded query fragment to a URL.
#[must_use]
pub fn append_query_fragment(url: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return url.to_owned();
    }

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{fragment}")
}

/// Builds the complete outbound request descriptor for one page load.
///
/// Headers combine the bearer token with the explicitly configured headers
/// (an explicit header wins over the token on name collision). A non-empty
/// configured body list becomes a JSON object body and switches the request
/// to POST; otherwise the data load is a GET.
pub fn build_request(
    config: &TableConfig,
    dynamic_values: &DynamicValueMap,
    page: u64,
    page_size: u64,
) -> TableResult<RequestDescriptor> {
    let url = build_api_url(
        &config.api,
        &config.path_params,
        &config.query_params,
        dynamic_values,
    )?;
    let url = append_query_fragment(
        url.as_str(),
        build_pagination_params(&config.pagination, page, page_size).as_str(),
    );

    let mut headers: Vec<(String, String)> = Vec::new();
    let token = config.api.token.trim();
    if !token.is_empty() {
        headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
    }

    for entry in &config.api.headers {
        let key = entry.key.trim();
        if key.is_empty() {
            continue;
        }

        match headers.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, existing_value)) => *existing_value = entry.value.clone(),
            None => headers.push((key.to_owned(), entry.value.clone())),
        }
    }

    let body_entries: Vec<_> = config
        .api
        .body
        .iter()
        .filter(|entry| !entry.key.trim().is_empty())
        .collect();
    let body = (!body_entries.is_empty()).then(|| {
        let mut map = Map::new();
        for entry in body_entries {
            map.insert(
                entry.key.trim().to_owned(),
                Value::String(entry.value.clone()),
            );
        }
        Value::Object(map)
    });

    let method = if body.is_some() {
        HttpMethod::Post
    } else {
        HttpMethod::Get
    };

    Ok(RequestDescriptor {
        method,
        url,
        headers,
        body,
    })
}
