//! Driven port for the home screen's illustrative remote fetch.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;

/// Fetches one sample JSON document from a remote API.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Return the remote document as untyped JSON.
    async fn fetch_sample(&self) -> Result<Value, Error>;
}

/// Offline stand-in returning a fixed post-shaped document.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSampleSource;

#[async_trait]
impl SampleSource for FixtureSampleSource {
    async fn fetch_sample(&self) -> Result<Value, Error> {
        Ok(serde_json::json!({
            "userId": 1,
            "id": 1,
            "title": "sample post",
            "body": "served without network access",
        }))
    }
}
