//! Session helpers to keep HTTP handlers free of store locking details.
//!
//! [`SessionContext`] captures the session state when the request is
//! extracted, so handlers can ask "is anyone signed in?" without touching
//! the application store lock.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, SessionSnapshot, SessionUser};
use crate::inbound::http::state::HttpState;

/// Session state observed at extraction time.
#[derive(Debug, Clone)]
pub struct SessionContext(SessionSnapshot);

impl SessionContext {
    /// Wrap an existing snapshot.
    #[must_use]
    pub const fn new(snapshot: SessionSnapshot) -> Self {
        Self(snapshot)
    }

    /// Whether a token was held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.0.authenticated
    }

    /// Profile of the signed-in user, when known.
    #[must_use]
    pub const fn current_user(&self) -> Option<&SessionUser> {
        self.0.current_user.as_ref()
    }

    /// Require a session or return `401 Unauthorized`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::unauthorized`] for anonymous viewers.
    pub fn require_authenticated(&self) -> Result<(), Error> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::unauthorized("login required"))
        }
    }

    /// The snapshot itself.
    #[must_use]
    pub fn into_snapshot(self) -> SessionSnapshot {
        self.0
    }
}

fn extract(req: &HttpRequest) -> Result<SessionContext, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let snapshot = state.store()?.session().snapshot();
    Ok(SessionContext::new(snapshot))
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
