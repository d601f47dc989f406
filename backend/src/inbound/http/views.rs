//! Guarded screen views.
//!
//! Each screen is served as a JSON snapshot of what the page would show:
//! layout (title, menu, preferences, session) plus screen-specific content.
//! The route guard runs first; redirects use `303 See Other`.
//!
//! ```text
//! GET /login
//! GET /
//! GET /about
//! GET /user
//! GET /user-management[?action=add]
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::debug;

use crate::domain::{
    AppStore, DirectoryView, MenuEntry, Preferences, Route, RouteDecision, SessionSnapshot,
    SessionUser, guard, menu_for,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Path the home screen posts to for its sample fetch.
const SAMPLE_ACTION: &str = "/api/v1/home/sample";

/// Screen-specific part of a [`ScreenView`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ScreenContent {
    /// Sign-in form.
    Login {
        /// Endpoint the form posts to.
        submit_to: &'static str,
    },
    /// Dashboard with the sample fetch action.
    Home {
        /// Endpoint that fetches the sample document.
        sample_action: &'static str,
    },
    /// Current display settings.
    About {
        /// Whether anyone is signed in.
        signed_in: bool,
    },
    /// Signed-in user's profile.
    User {
        /// Profile, absent after a restart until the next login.
        profile: Option<SessionUser>,
    },
    /// Directory table.
    UserManagement {
        /// Current page and pager state.
        directory: DirectoryView,
        /// Whether the add form is open.
        adding: bool,
    },
    /// Unknown path.
    NotFound {
        /// Path that did not match any screen.
        path: String,
    },
}

/// Everything a screen renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    /// Resolved screen.
    pub route: Route,
    /// Header title.
    pub title: &'static str,
    /// Session state.
    pub session: SessionSnapshot,
    /// Display preferences.
    pub preferences: Preferences,
    /// Navigation entries visible to this viewer.
    pub menu: Vec<MenuEntry>,
    /// Screen-specific content.
    pub content: ScreenContent,
}

fn wants_add_form(query: &str) -> bool {
    query.split('&').any(|pair| pair == "action=add")
}

fn build_view(store: &AppStore, route: Route, req: &HttpRequest) -> ScreenView {
    let session = store.session().snapshot();
    let content = match route {
        Route::Login => ScreenContent::Login {
            submit_to: "/api/v1/login",
        },
        Route::Home => ScreenContent::Home {
            sample_action: SAMPLE_ACTION,
        },
        Route::About => ScreenContent::About {
            signed_in: session.current_user.is_some(),
        },
        Route::User => ScreenContent::User {
            profile: session.current_user.clone(),
        },
        Route::UserManagement => ScreenContent::UserManagement {
            directory: store.directory().view(),
            adding: wants_add_form(req.query_string()),
        },
        Route::NotFound => ScreenContent::NotFound {
            path: req.path().to_owned(),
        },
    };
    ScreenView {
        route,
        title: route.title(),
        menu: menu_for(req.path(), session.authenticated),
        session,
        preferences: store.preferences().clone(),
        content,
    }
}

/// Run the guard for the request path and render or redirect.
///
/// Registered for every screen path and as the default service, so unknown
/// paths render the not-found screen with a 404 status.
pub async fn render_screen(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let store = state.store()?;
    let decision = guard(req.path(), store.session().is_authenticated());
    debug!(path = req.path(), ?decision, "screen requested");
    let response = match decision {
        RouteDecision::Redirect(target) => HttpResponse::SeeOther()
            .insert_header((LOCATION, target))
            .finish(),
        RouteDecision::Render(Route::NotFound) => {
            HttpResponse::NotFound().json(build_view(&store, Route::NotFound, &req))
        }
        RouteDecision::Render(route) => HttpResponse::Ok().json(build_view(&store, route, &req)),
    };
    Ok(response)
}

/// Register the screen routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for route in [
        Route::Login,
        Route::Home,
        Route::About,
        Route::User,
        Route::UserManagement,
    ] {
        if let Some(path) = route.path() {
            cfg.route(path, web::get().to(render_screen));
        }
    }
}
