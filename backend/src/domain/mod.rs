//! Domain primitives, stores and ports.
//!
//! Purpose: hold the console's state and rules independently of any
//! transport. Inbound adapters drive the stores through [`AppStore`];
//! outbound adapters implement the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - AppStore: session, preferences and user directory in one place.
//! - guard / Route: screen table and authentication guard.
//! - menu_for: navigation entries visible to the current viewer.

pub mod app_store;
pub mod auth;
pub mod directory;
pub mod error;
pub mod menu;
pub mod ports;
pub mod preferences;
pub mod routing;
pub mod session;
pub mod user;

pub use self::app_store::AppStore;
pub use self::auth::{LoginCredentials, LoginValidationError, SessionToken, SessionUser};
pub use self::directory::{DirectoryView, UserDirectory, seed_records};
pub use self::error::{Error, ErrorCode};
pub use self::menu::{MenuEntry, menu_for};
pub use self::preferences::{DEFAULT_LANGUAGE, ParseThemeError, Preferences, Theme};
pub use self::routing::{HOME_PATH, LOGIN_PATH, Route, RouteDecision, guard};
pub use self::session::{SessionError, SessionSnapshot, SessionStore};
pub use self::user::{
    Role, UserDraft, UserForm, UserId, UserPatch, UserRecord, UserValidationError,
    UserValidationErrors,
};

/// Convenient result alias for console operations.
///
/// # Examples
/// ```
/// use admin_console::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
