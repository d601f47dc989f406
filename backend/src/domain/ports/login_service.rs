//! Driving port for login.
//!
//! Inbound adapters call [`LoginService`] to exchange credentials for a
//! session token without knowing how authentication is performed. The only
//! implementation today is [`MockLoginService`], which accepts any
//! well-formed credentials after a short artificial delay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::{Error, LoginCredentials, Role, SessionToken, SessionUser, UserId};

/// Delay applied by [`MockLoginService`] before answering.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(500);

/// Token and profile handed back by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Bearer token for subsequent requests.
    pub token: SessionToken,
    /// Profile of the signed-in user.
    pub user: SessionUser,
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return a session token plus profile.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}

/// Demonstration authenticator: any username/password pair succeeds.
///
/// The issued token is `token_<epoch millis>`, and the user is an admin whose
/// email is derived from the username.
pub struct MockLoginService {
    clock: Arc<dyn Clock>,
    delay: Duration,
}

impl MockLoginService {
    /// Build the service with an explicit clock and artificial delay.
    pub fn new(clock: Arc<dyn Clock>, delay: Duration) -> Self {
        Self { clock, delay }
    }
}

#[async_trait]
impl LoginService for MockLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let millis = self.clock.utc().timestamp_millis();
        let username = credentials.username();
        info!(username, "mock login accepted");
        Ok(LoginOutcome {
            token: SessionToken::new(format!("token_{millis}")),
            user: SessionUser {
                id: UserId::new(millis),
                name: username.to_owned(),
                email: format!("{username}@example.com"),
                role: Role::Admin,
            },
        })
    }
}
