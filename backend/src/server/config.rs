//! Console settings loaded via OrthoConfig.
//!
//! Every value is optional in the sources (CLI flags, `CONSOLE_*`
//! environment variables, configuration files); accessors fall back to the
//! defaults below.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{DEFAULT_PAGE_SIZE, PageSize, PageSizeError};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::DEFAULT_LANGUAGE;
use crate::domain::ports::DEFAULT_LOGIN_DELAY;
use crate::outbound::DEFAULT_SAMPLE_PATH;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_DIR: &str = ".console-state";
const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Settings values that failed to parse.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value}: {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The API base URL is not absolute.
    #[error("invalid API base URL {value}: {source}")]
    ApiBaseUrl {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The default page size is zero.
    #[error("invalid default page size: {0}")]
    PageSize(#[from] PageSizeError),
}

/// Configuration values controlling the console server.
///
/// Every field may be absent from all sources; missing values deserialize
/// to `None` and the accessors supply the defaults.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "CONSOLE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Directory holding the persisted session token.
    pub storage_dir: Option<PathBuf>,
    /// Base URL of the remote API.
    pub api_base_url: Option<String>,
    /// Path fetched by the home screen's sample action.
    pub sample_path: Option<String>,
    /// Artificial delay of the mock login, in milliseconds.
    pub login_delay_ms: Option<u64>,
    /// Rows per page in the user directory.
    pub page_size: Option<usize>,
    /// Initial language tag.
    pub language: Option<String>,
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the token storage directory, falling back to
    /// `./.console-state`.
    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        self.storage_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STORAGE_DIR))
    }

    /// Return the remote API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ApiBaseUrl`] when the value is not an
    /// absolute URL.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let value = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::ApiBaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the sample path, falling back to `/posts/1`.
    #[must_use]
    pub fn sample_path(&self) -> &str {
        self.sample_path.as_deref().unwrap_or(DEFAULT_SAMPLE_PATH)
    }

    /// Return the mock login delay, falling back to 500 ms.
    #[must_use]
    pub fn login_delay(&self) -> Duration {
        self.login_delay_ms
            .map_or(DEFAULT_LOGIN_DELAY, Duration::from_millis)
    }

    /// Return the directory page size, falling back to 10.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::PageSize`] when configured as zero.
    pub fn page_size(&self) -> Result<PageSize, SettingsError> {
        Ok(PageSize::new(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))?)
    }

    /// Return the initial language, falling back to `zh-CN`.
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}
