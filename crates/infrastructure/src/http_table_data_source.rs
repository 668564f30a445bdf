use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use gridwire_application::{RequestDescriptor, TableDataSource};
use gridwire_core::{TableError, TableResult};
use gridwire_domain::HttpMethod;

/// Request timeout used when the host supplies none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-backed data source for table page loads.
pub struct HttpTableDataSource {
    http_client: reqwest::Client,
}

impl HttpTableDataSource {
    /// Creates a data source with its own client and the given timeout.
    pub fn new(timeout: Duration) -> TableResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                TableError::Internal(format!("failed to build HTTP client: {error}"))
            })?;

        Ok(Self { http_client })
    }

    /// Creates a data source around an existing client.
    #[must_use]
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl TableDataSource for HttpTableDataSource {
    async fn fetch(&self, request: RequestDescriptor) -> TableResult<Value> {
        let mut builder = self
            .http_client
            .request(to_reqwest_method(request.method), request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

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

        response.json::<Value>().await.map_err(|error| {
            TableError::Mapping(format!("response body is not valid JSON: {error}"))
        })
    }
}

pub(crate) fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> TableError {
    if error.is_timeout() {
        TableError::Timeout(error.to_string())
    } else {
        TableError::Network(error.to_string())
    }
}
