//! Server construction and middleware wiring.

pub mod config;

pub use config::{AppSettings, SettingsError};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

use crate::Trace;
use crate::domain::AppStore;
use crate::domain::ports::{MockLoginService, TokenStore};
use crate::inbound::http::auth::{login, logout, session};
use crate::inbound::http::home::fetch_sample;
use crate::inbound::http::preferences::{get_preferences, toggle_theme, update_preferences};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    create_user, delete_user, list_users, set_editing, update_query, update_user,
};
use crate::inbound::http::views::{self, render_screen};
use crate::outbound::{ApiClient, DEFAULT_TIMEOUT, FileTokenStore, HttpSampleSource};

/// Path prefix of the JSON API.
pub const API_SCOPE: &str = "/api/v1";

/// Failures while assembling the server from settings.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A settings value did not parse.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The token directory could not be opened.
    #[error("failed to open storage directory {path}: {source}")]
    Storage {
        /// Directory that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Register the JSON API routes under [`API_SCOPE`].
///
/// `/users/query` and `/users/editing` are registered before `/users/{id}`
/// so the literal segments win.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_SCOPE)
            .service(login)
            .service(logout)
            .service(session)
            .service(get_preferences)
            .service(update_preferences)
            .service(toggle_theme)
            .service(list_users)
            .service(create_user)
            .service(update_query)
            .service(set_editing)
            .service(update_user)
            .service(delete_user)
            .service(fetch_sample),
    );
}

/// Build the application: API scope, screen routes and the not-found
/// fallback, all behind the trace middleware.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(configure_api)
        .configure(views::configure)
        .default_service(web::to(render_screen))
}

/// Wire the production adapters described by `settings`.
///
/// # Errors
///
/// Returns [`StartupError`] when a setting is malformed, the storage
/// directory cannot be opened or the HTTP client cannot be built.
pub fn build_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let storage_dir = settings.storage_dir();
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(storage_dir).map_err(
        |source| StartupError::Storage {
            path: storage_dir.display().to_string(),
            source,
        },
    )?);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let store = AppStore::bootstrap(
        tokens.clone(),
        clock.clone(),
        settings.language(),
        settings.page_size()?,
    );
    let login_service = MockLoginService::new(clock, settings.login_delay());
    let client = ApiClient::new(settings.api_base_url()?, DEFAULT_TIMEOUT, tokens)?;
    let sample = HttpSampleSource::new(Arc::new(client), settings.sample_path());

    Ok(HttpState::new(store, Arc::new(login_service), Arc::new(sample)))
}

/// Construct an Actix HTTP server bound to `bind_addr`.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(state: HttpState, bind_addr: SocketAddr) -> std::io::Result<Server> {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || build_app(data.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, "console server listening");
    Ok(server)
}
