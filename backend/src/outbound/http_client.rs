//! Reqwest-backed JSON client for the console's remote API.
//!
//! The client owns transport details only: base URL joining, bearer
//! authentication from the token store, the request timeout, status mapping
//! and the `{code, success, message}` response envelope.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::ports::TokenStore;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const FALLBACK_REJECTION: &str = "request failed";
const APPLICATION_JSON: &str = "application/json";

/// Failures surfaced by [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The path could not be joined onto the base URL.
    #[error("invalid request path {path}: {message}")]
    InvalidPath {
        /// Path as supplied by the caller.
        path: String,
        /// Parser failure description.
        message: String,
    },
    /// No response arrived within the timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Transport failure description.
        message: String,
    },
    /// The request never produced a response.
    #[error("network error: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
    /// The server answered with a non-2xx status.
    #[error("{message} (status {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable summary of the status.
        message: String,
    },
    /// A 2xx envelope reported a business failure.
    #[error("{0}")]
    Rejected(String),
    /// The body was not the expected JSON.
    #[error("invalid JSON response: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },
}

/// JSON client bound to one base URL.
///
/// Every request carries `Content-Type: application/json` and, when the
/// token store holds a token, `Authorization: Bearer <token>`.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(client, base_url, tokens))
    }

    /// Wrap an already configured reqwest client.
    #[must_use]
    pub const fn from_client(client: Client, base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            base_url,
            tokens,
        }
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET path?params`.
    ///
    /// # Errors
    ///
    /// See [`HttpClientError`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, HttpClientError> {
        let request = self.request(Method::GET, path)?.query(params);
        self.execute(request).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClientError`].
    pub async fn post<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpClientError> {
        let request = self.request(Method::POST, path)?.json(body);
        self.execute(request).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClientError`].
    pub async fn put<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpClientError> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.execute(request).await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClientError`].
    pub async fn patch<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpClientError> {
        let request = self.request(Method::PATCH, path)?.json(body);
        self.execute(request).await
    }

    /// `DELETE path?params`.
    ///
    /// # Errors
    ///
    /// See [`HttpClientError`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, HttpClientError> {
        let request = self.request(Method::DELETE, path)?.query(params);
        self.execute(request).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, HttpClientError> {
        let url = join_url(&self.base_url, path)?;
        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
            .header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        match self.tokens.load() {
            Ok(Some(token)) => request = request.bearer_auth(token.as_str()),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "sending request without bearer token"),
        }
        Ok(request)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, HttpClientError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        let value = decode_body(body.as_ref())?;
        let accepted = check_envelope(value)?;
        serde_json::from_value(accepted).map_err(|err| HttpClientError::Decode {
            message: err.to_string(),
        })
    }
}

/// Resolve `path` under `base`, keeping any path prefix the base carries.
fn join_url(base: &Url, path: &str) -> Result<Url, HttpClientError> {
    let mut prefix = base.as_str().trim_end_matches('/').to_owned();
    prefix.push('/');
    let joined = format!("{prefix}{}", path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|err| HttpClientError::InvalidPath {
        path: path.to_owned(),
        message: err.to_string(),
    })
}

fn decode_body(body: &[u8]) -> Result<Value, HttpClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|err| HttpClientError::Decode {
        message: err.to_string(),
    })
}

/// Accept a body only when it reports `code == 200` or a truthy `success`.
///
/// Bodies without either marker, including bare documents and non-objects,
/// are rejected with their `message` or [`FALLBACK_REJECTION`].
fn check_envelope(body: Value) -> Result<Value, HttpClientError> {
    let object = body.as_object();
    let ok_code = object
        .and_then(|fields| fields.get("code"))
        .is_some_and(|code| code.as_i64() == Some(200));
    let ok_flag = object
        .and_then(|fields| fields.get("success"))
        .is_some_and(is_truthy);
    if ok_code || ok_flag {
        return Ok(body);
    }

    let message = object
        .and_then(|fields| fields.get("message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(FALLBACK_REJECTION)
        .to_owned();
    warn!(%message, "remote API rejected request");
    Err(HttpClientError::Rejected(message))
}

/// JSON truthiness: `false`, `null`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => "unauthorised, please log in again",
        StatusCode::FORBIDDEN => "access denied",
        StatusCode::NOT_FOUND => "requested resource does not exist",
        StatusCode::INTERNAL_SERVER_ERROR => "server error",
        _ => FALLBACK_REJECTION,
    }
}

fn map_status_error(status: StatusCode) -> HttpClientError {
    let message = status_message(status);
    error!(status = status.as_u16(), "{message}");
    HttpClientError::Status {
        status: status.as_u16(),
        message: message.to_owned(),
    }
}

fn map_transport_error(error: reqwest::Error) -> HttpClientError {
    if error.is_timeout() {
        HttpClientError::Timeout {
            message: error.to_string(),
        }
    } else {
        HttpClientError::Transport {
            message: error.to_string(),
        }
    }
}
