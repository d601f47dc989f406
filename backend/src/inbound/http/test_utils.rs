//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use pagination::PageSize;

use crate::domain::ports::{FixtureSampleSource, InMemoryTokenStore, MockLoginService};
use crate::domain::{AppStore, Role, SessionToken, SessionUser, UserId};
use crate::inbound::http::state::HttpState;
use crate::test_support::FixedClock;

/// Epoch millis every test clock is frozen at (2026-01-01T00:00:00Z).
pub const TEST_NOW_MILLIS: i64 = 1_767_225_600_000;

/// Anonymous state over the seeded directory, an in-memory token slot and a
/// login service without delay.
pub fn test_state() -> HttpState {
    test_state_with(Arc::new(InMemoryTokenStore::default()))
}

/// Like [`test_state`] but persisting tokens to `storage`.
pub fn test_state_with(storage: Arc<InMemoryTokenStore>) -> HttpState {
    let clock = Arc::new(FixedClock::at_millis(TEST_NOW_MILLIS));
    let store = AppStore::bootstrap(storage, clock.clone(), "zh-CN", PageSize::default());
    HttpState::new(
        store,
        Arc::new(MockLoginService::new(clock, Duration::ZERO)),
        Arc::new(FixtureSampleSource),
    )
}

/// State with `ada` already signed in.
pub fn signed_in_state() -> HttpState {
    let state = test_state();
    state
        .store()
        .expect("lock store")
        .session_mut()
        .login(
            SessionToken::new("token_test"),
            SessionUser {
                id: UserId::new(TEST_NOW_MILLIS),
                name: "ada".to_owned(),
                email: "ada@example.com".to_owned(),
                role: Role::Admin,
            },
        )
        .expect("in-memory login");
    state
}
