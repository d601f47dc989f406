//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the application store and domain ports, and remain testable
//! without I/O.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::error;

use crate::domain::ports::{LoginService, SampleSource};
use crate::domain::{AppStore, Error};

/// Dependency bundle for HTTP handlers.
///
/// The store sits behind one mutex: every mutation completes under the
/// lock, and handlers release it before awaiting a port.
#[derive(Clone)]
pub struct HttpState {
    store: Arc<Mutex<AppStore>>,
    /// Authenticator used by `POST /api/v1/login`.
    pub login: Arc<dyn LoginService>,
    /// Remote document fetched by the home screen.
    pub sample: Arc<dyn SampleSource>,
}

impl HttpState {
    /// Wrap `store` and the ports handlers call into.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use admin_console::domain::AppStore;
    /// use admin_console::domain::ports::{
    ///     FixtureSampleSource, InMemoryTokenStore, MockLoginService,
    /// };
    /// use admin_console::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    /// use pagination::PageSize;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let store = AppStore::bootstrap(
    ///     Arc::new(InMemoryTokenStore::default()),
    ///     clock.clone(),
    ///     "zh-CN",
    ///     PageSize::default(),
    /// );
    /// let state = HttpState::new(
    ///     store,
    ///     Arc::new(MockLoginService::new(clock, Duration::ZERO)),
    ///     Arc::new(FixtureSampleSource),
    /// );
    /// assert!(!state.store().expect("lock").session().is_authenticated());
    /// ```
    pub fn new(
        store: AppStore,
        login: Arc<dyn LoginService>,
        sample: Arc<dyn SampleSource>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            login,
            sample,
        }
    }

    /// Lock the application store.
    ///
    /// # Errors
    ///
    /// Returns an internal error when a previous holder panicked.
    pub fn store(&self) -> Result<MutexGuard<'_, AppStore>, Error> {
        self.store.lock().map_err(|err| {
            error!(error = %err, "application store lock poisoned");
            Error::internal("application store unavailable")
        })
    }
}
