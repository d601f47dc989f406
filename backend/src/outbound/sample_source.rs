//! Sample source backed by the remote API client.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::http_client::{ApiClient, HttpClientError};
use crate::domain::Error;
use crate::domain::ports::SampleSource;

/// Remote path fetched when none is configured.
pub const DEFAULT_SAMPLE_PATH: &str = "/posts/1";

/// Fetches the sample document with `GET <base>/<path>`.
pub struct HttpSampleSource {
    client: Arc<ApiClient>,
    path: String,
}

impl HttpSampleSource {
    /// Fetch `path` through `client`.
    pub fn new(client: Arc<ApiClient>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }
}

#[async_trait]
impl SampleSource for HttpSampleSource {
    async fn fetch_sample(&self) -> Result<Value, Error> {
        let value: Value = self
            .client
            .get(&self.path, &[])
            .await
            .map_err(map_client_error)?;
        info!(path = %self.path, "sample document fetched");
        Ok(value)
    }
}

/// Remote failures are dependency outages from the console's point of view.
fn map_client_error(error: HttpClientError) -> Error {
    match error {
        HttpClientError::InvalidPath { .. } => Error::internal(error.to_string()),
        other => Error::service_unavailable(other.to_string()),
    }
}
