use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use gridwire_application::{ActionHttpClient, ActionRequest};
use gridwire_core::{TableError, TableResult};

use crate::http_table_data_source::{map_transport_error, to_reqwest_method};

/// Reqwest-backed transport for `api`-type click actions.
pub struct HttpActionClient {
    http_client: reqwest::Client,
}

impl HttpActionClient {
    /// Creates an action client with its own client and the given timeout.
    pub fn new(timeout: Duration) -> TableResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                TableError::Internal(format!("failed to build HTTP client: {error}"))
            })?;

        Ok(Self { http_client })
    }

    /// Creates an action client around an existing client.
    #[must_use]
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl ActionHttpClient for HttpActionClient {
    async fn execute(&self, request: ActionRequest) -> TableResult<Value> {
        let mut builder = self
            .http_client
            .request(to_reqwest_method(request.method), request.url.as_str());

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(TableError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        if response.content_length() == Some(0) {
            return Ok(Value::Null);
        }

        response
            .json::<Value>()
            .await
            .or_else(|_| Ok(Value::Null))
    }
}
