//! Shared wiring for the console integration tests.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use admin_console::domain::AppStore;
use admin_console::domain::ports::{FixtureSampleSource, MockLoginService, TokenStore};
use admin_console::inbound::http::state::HttpState;
use admin_console::outbound::FileTokenStore;
use admin_console::test_support::FixedClock;
use pagination::PageSize;

/// Epoch millis the test clock is frozen at (2026-01-01T00:00:00Z).
pub const NOW_MILLIS: i64 = 1_767_225_600_000;

/// State persisting its token under `dir`, with an instant mock login and
/// the fixture sample document.
pub fn state_over(dir: &Path) -> HttpState {
    let tokens: Arc<dyn TokenStore> =
        Arc::new(FileTokenStore::open(dir).expect("open token directory"));
    let clock = Arc::new(FixedClock::at_millis(NOW_MILLIS));
    let store = AppStore::bootstrap(tokens, clock.clone(), "zh-CN", PageSize::default());
    HttpState::new(
        store,
        Arc::new(MockLoginService::new(clock, Duration::ZERO)),
        Arc::new(FixtureSampleSource),
    )
}
