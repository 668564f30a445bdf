use gridwire_core::{TableError, TableResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// One configured key/value entry for request headers or body fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    /// Entry name as typed in the builder.
    pub key: String,
    /// Entry value.
    pub value: String,
}

/// Connection settings for the remote REST API backing a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConnectionConfig {
    /// Absolute base URL of the remote API, scheme and host included.
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Resource path, possibly containing `{name}` or `:name` placeholders.
    pub path: String,
    /// Optional bearer token sent as the `Authorization` header.
    pub token: String,
    /// Additional request headers.
    pub headers: Vec<KeyValuePair>,
    /// Request body entries, serialized as a JSON object when non-empty.
    pub body: Vec<KeyValuePair>,
}

impl ApiConnectionConfig {
    /// Checks that the connection is usable for building requests.
    pub fn validate(&self) -> TableResult<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(TableError::Config("api baseURL is required".to_owned()));
        }

        let parsed = Url::parse(base_url).map_err(|error| {
            TableError::Config(format!("api baseURL '{base_url}' is not a valid URL: {error}"))
        })?;

        if !parsed.has_host() {
            return Err(TableError::Config(format!(
                "api baseURL '{base_url}' must be absolute with a scheme and host"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiConnectionConfig;

    #[test]
    fn validate_rejects_empty_base_url() {
        let config = ApiConnectionConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let config = ApiConnectionConfig {
            base_url: "/api/v2".to_owned(),
            ..ApiConnectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_hostless_scheme() {
        let config = ApiConnectionConfig {
            base_url: "mailto:ops@example.com".to_owned(),
            ..ApiConnectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_absolute_base_url() {
        let config = ApiConnectionConfig {
            base_url: "https://api.example.com/v2".to_owned(),
            ..ApiConnectionConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_keeps_wire_spelling() {
        let parsed: ApiConnectionConfig = serde_json::from_value(serde_json::json!({
            "baseURL": "https://api.example.com",
            "path": "/users"
        }))
        .unwrap_or_default();
        assert_eq!(parsed.base_url, "https://api.example.com");
        assert_eq!(parsed.path, "/users");
    }
}
