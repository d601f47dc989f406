//! Screen table and the authentication guard that sits in front of it.
//!
//! The guard is a pure function of the requested path and whether the
//! viewer holds a session token. It never fails: unknown paths resolve to
//! [`Route::NotFound`], which always renders.

use serde::Serialize;

/// Path of the only public screen.
pub const LOGIN_PATH: &str = "/login";
/// Path anonymous viewers land on after signing in.
pub const HOME_PATH: &str = "/";

/// Screens the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Sign-in form.
    Login,
    /// Dashboard.
    Home,
    /// Static about page.
    About,
    /// Profile of the signed-in user.
    User,
    /// User directory table.
    UserManagement,
    /// Fallback for unknown paths.
    NotFound,
}

impl Route {
    const TABLE: [(&'static str, Self); 5] = [
        (LOGIN_PATH, Self::Login),
        (HOME_PATH, Self::Home),
        ("/about", Self::About),
        ("/user", Self::User),
        ("/user-management", Self::UserManagement),
    ];

    /// Resolve a request path, ignoring any query string or fragment.
    ///
    /// # Examples
    /// ```
    /// use admin_console::domain::Route;
    ///
    /// assert_eq!(Route::resolve("/about?tab=team"), Route::About);
    /// assert_eq!(Route::resolve("/nowhere"), Route::NotFound);
    /// ```
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        Self::TABLE
            .iter()
            .find(|(candidate, _)| *candidate == bare)
            .map_or(Self::NotFound, |(_, route)| *route)
    }

    /// Canonical path of the screen; `None` for [`Route::NotFound`].
    #[must_use]
    pub fn path(self) -> Option<&'static str> {
        Self::TABLE
            .iter()
            .find(|(_, route)| *route == self)
            .map(|(path, _)| *path)
    }

    /// Screen title shown in the layout header.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Home",
            Self::About => "About",
            Self::User => "User Center",
            Self::UserManagement => "User Management",
            Self::NotFound => "Page Not Found",
        }
    }

    /// Whether the screen needs a session token.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        matches!(
            self,
            Self::Home | Self::About | Self::User | Self::UserManagement
        )
    }
}

/// Outcome of running the guard for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show the screen.
    Render(Route),
    /// Send the viewer elsewhere.
    Redirect(&'static str),
}

/// Decide what a viewer sees when navigating to `path`.
///
/// Anonymous viewers are sent to the login screen from every protected
/// route; signed-in viewers are sent home from the login screen.
///
/// # Examples
/// ```
/// use admin_console::domain::{guard, Route, RouteDecision};
///
/// assert_eq!(guard("/user", false), RouteDecision::Redirect("/login"));
/// assert_eq!(guard("/user", true), RouteDecision::Render(Route::User));
/// ```
#[must_use]
pub fn guard(path: &str, authenticated: bool) -> RouteDecision {
    let route = Route::resolve(path);
    match route {
        Route::Login if authenticated => RouteDecision::Redirect(HOME_PATH),
        protected if protected.requires_auth() && !authenticated => {
            RouteDecision::Redirect(LOGIN_PATH)
        }
        other => RouteDecision::Render(other),
    }
}
