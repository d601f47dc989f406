//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`LoginService`]) are called by inbound adapters; driven
//! ports ([`TokenStore`], [`SampleSource`]) are implemented by outbound
//! adapters.

mod login_service;
mod sample_source;
mod token_store;

pub use login_service::{DEFAULT_LOGIN_DELAY, LoginOutcome, LoginService, MockLoginService};
pub use sample_source::{FixtureSampleSource, SampleSource};
#[cfg(test)]
pub use token_store::MockTokenStore;
pub use token_store::{InMemoryTokenStore, TOKEN_KEY, TokenStore, TokenStoreError};
