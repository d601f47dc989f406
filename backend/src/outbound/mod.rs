//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **token_store**: token slot persisted in a `cap-std` directory
//! - **http_client**: reqwest JSON client for the remote API
//! - **sample_source**: the home screen's sample fetch over that client
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod http_client;
pub mod sample_source;
pub mod token_store;

pub use http_client::{ApiClient, DEFAULT_TIMEOUT, HttpClientError};
pub use sample_source::{DEFAULT_SAMPLE_PATH, HttpSampleSource};
pub use token_store::FileTokenStore;
