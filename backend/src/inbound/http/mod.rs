//! HTTP inbound adapter exposing the JSON API and guarded screen views.

pub mod auth;
pub mod error;
pub mod home;
pub mod preferences;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod views;

pub use error::ApiResult;
