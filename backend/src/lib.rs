//! Admin console backend.
//!
//! A hexagonal layout: `domain` holds the stores and ports, `inbound::http`
//! exposes them as a JSON API plus guarded screen views, and `outbound`
//! implements the token slot and the remote API client. `server` wires the
//! pieces from [`server::AppSettings`].

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
