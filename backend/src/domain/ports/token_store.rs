//! Driven port for the durable session token slot.
//!
//! The session store mirrors its token into this slot on every change so a
//! restarted console comes back signed in. Implementations hold exactly one
//! value under the `token` key.

use std::sync::Mutex;

use thiserror::Error;

use crate::domain::SessionToken;

/// Key under which the session token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Errors raised by durable token storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenStoreError {
    /// The stored value could not be read.
    #[error("failed to read token slot: {message}")]
    Read {
        /// Underlying failure description.
        message: String,
    },
    /// The value could not be written.
    #[error("failed to write token slot: {message}")]
    Write {
        /// Underlying failure description.
        message: String,
    },
    /// The value could not be removed.
    #[error("failed to remove token slot: {message}")]
    Remove {
        /// Underlying failure description.
        message: String,
    },
}

impl TokenStoreError {
    /// Build a [`TokenStoreError::Read`].
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Build a [`TokenStoreError::Write`].
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Build a [`TokenStoreError::Remove`].
    pub fn remove(message: impl Into<String>) -> Self {
        Self::Remove {
            message: message.into(),
        }
    }
}

/// Single-slot durable key-value storage for the session token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any.
    fn load(&self) -> Result<Option<SessionToken>, TokenStoreError>;

    /// Persist `token`, replacing any previous value.
    fn save(&self, token: &SessionToken) -> Result<(), TokenStoreError>;

    /// Remove the persisted token. Removing an empty slot succeeds.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Process-local token slot for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    slot: Mutex<Option<SessionToken>>,
}

impl InMemoryTokenStore {
    /// Start with `token` already persisted.
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<SessionToken>> {
        // A poisoned slot still holds a coherent Option.
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, TokenStoreError> {
        Ok(self.lock().clone())
    }

    fn save(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        *self.lock() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_slot_round_trips() {
        let store = InMemoryTokenStore::default();
        assert_eq!(store.load().expect("load"), None);

        store.save(&SessionToken::new("abc")).expect("save");
        assert_eq!(store.load().expect("load"), Some(SessionToken::new("abc")));

        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn errors_describe_the_failed_operation() {
        assert_eq!(
            TokenStoreError::write("disk full").to_string(),
            "failed to write token slot: disk full"
        );
    }
}
