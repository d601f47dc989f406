//! Session store: the signed-in user's token and profile.
//!
//! The token is written through to a [`TokenStore`] on every change, so the
//! store restores itself as authenticated after a restart. The profile is
//! not persisted; a restored session has a token but no current user until
//! the next login.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::ports::{TokenStore, TokenStoreError};
use super::{SessionToken, SessionUser};

/// Errors raised while mirroring the token to durable storage.
///
/// The in-memory state has already been updated when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The durable token slot rejected the change.
    #[error("session token could not be mirrored to storage: {0}")]
    Storage(#[from] TokenStoreError),
}

/// Token, profile and authentication flag for the console's single viewer.
///
/// ## Invariants
/// - `is_authenticated()` is true exactly when a token is held.
/// - The durable slot holds the same token as memory after every
///   successful mutation.
pub struct SessionStore {
    token: Option<SessionToken>,
    current_user: Option<SessionUser>,
    storage: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Initialise from the durable slot.
    ///
    /// An unreadable slot is logged and treated as empty so the console can
    /// still start anonymously.
    pub fn restore(storage: Arc<dyn TokenStore>) -> Self {
        let token = match storage.load() {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "ignoring unreadable session token");
                None
            }
        };
        if token.is_some() {
            info!("restored persisted session token");
        }
        Self {
            token,
            current_user: None,
            storage,
        }
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Profile of the signed-in user, if known.
    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current_user.as_ref()
    }

    /// Record a successful login and persist its token.
    pub fn login(&mut self, token: SessionToken, user: SessionUser) -> Result<(), SessionError> {
        self.current_user = Some(user);
        self.set_token(Some(token))
    }

    /// Replace or clear the token, mirroring the change to storage.
    pub fn set_token(&mut self, token: Option<SessionToken>) -> Result<(), SessionError> {
        self.token = token;
        match &self.token {
            Some(held) => self.storage.save(held)?,
            None => self.storage.clear()?,
        }
        Ok(())
    }

    /// Replace the signed-in user's profile. Authentication still follows
    /// the token.
    pub fn set_user_info(&mut self, user: SessionUser) {
        self.current_user = Some(user);
    }

    /// Forget the token and profile and remove the persisted token.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.current_user = None;
        self.set_token(None)
    }

    /// Serialisable view of the session for the view layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: self.is_authenticated(),
            current_user: self.current_user.clone(),
        }
    }
}

/// Session state exposed to views; the token itself is never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Whether a token is held.
    pub authenticated: bool,
    /// Profile of the signed-in user, when known.
    pub current_user: Option<SessionUser>,
}
