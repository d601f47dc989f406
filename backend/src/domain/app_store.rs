//! Application-wide state: session, preferences and user directory.
//!
//! One [`AppStore`] is built by the application root and shared with the
//! inbound adapters. Nothing here is global.

use std::sync::Arc;

use mockable::Clock;
use pagination::PageSize;

use super::ports::TokenStore;
use super::{Preferences, SessionStore, UserDirectory};

/// The three stores that make up the console's state.
pub struct AppStore {
    session: SessionStore,
    preferences: Preferences,
    directory: UserDirectory,
}

impl AppStore {
    /// Assemble a store from already built parts.
    #[must_use]
    pub const fn new(
        session: SessionStore,
        preferences: Preferences,
        directory: UserDirectory,
    ) -> Self {
        Self {
            session,
            preferences,
            directory,
        }
    }

    /// Startup state: the session restored from `storage`, default
    /// preferences in `language` and the seeded directory.
    pub fn bootstrap(
        storage: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        language: impl Into<String>,
        page_size: PageSize,
    ) -> Self {
        Self::new(
            SessionStore::restore(storage),
            Preferences::new(language),
            UserDirectory::seeded(clock, page_size),
        )
    }

    /// Session store.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Session store, mutably.
    pub const fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Preferences store.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Preferences store, mutably.
    pub const fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    /// User directory store.
    #[must_use]
    pub const fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// User directory store, mutably.
    pub const fn directory_mut(&mut self) -> &mut UserDirectory {
        &mut self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::InMemoryTokenStore;
    use crate::domain::{SessionToken, Theme};
    use crate::test_support::FixedClock;

    fn page_size() -> PageSize {
        PageSize::new(10).expect("non-zero page size")
    }

    #[test]
    fn bootstrap_starts_anonymous_without_a_saved_token() {
        let store = AppStore::bootstrap(
            Arc::new(InMemoryTokenStore::default()),
            Arc::new(FixedClock::at_millis(0)),
            "en-US",
            page_size(),
        );

        assert!(!store.session().is_authenticated());
        assert_eq!(store.preferences().language(), "en-US");
        assert_eq!(store.preferences().theme(), Theme::Light);
        assert_eq!(store.directory().len(), 5);
    }

    #[test]
    fn bootstrap_restores_a_saved_token() {
        let storage = InMemoryTokenStore::with_token(SessionToken::new("token_1"));
        let store = AppStore::bootstrap(
            Arc::new(storage),
            Arc::new(FixedClock::at_millis(0)),
            "zh-CN",
            page_size(),
        );

        assert!(store.session().is_authenticated());
        assert!(store.session().current_user().is_none());
    }

    #[test]
    fn stores_mutate_independently() {
        let mut store = AppStore::bootstrap(
            Arc::new(InMemoryTokenStore::default()),
            Arc::new(FixedClock::at_millis(0)),
            "zh-CN",
            page_size(),
        );

        store.preferences_mut().toggle_theme();
        store.directory_mut().set_search_keyword("li");

        assert_eq!(store.preferences().theme(), Theme::Dark);
        assert_eq!(store.directory().search_keyword(), "li");
        assert!(!store.session().is_authenticated());
    }
}
