//! Preferences HTTP handlers.
//!
//! ```text
//! GET /api/v1/preferences
//! PUT /api/v1/preferences {"theme":"dark","language":"en-US"}
//! POST /api/v1/preferences/theme/toggle
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Preferences, Theme};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::theme_error;

/// Request payload for updating preferences; absent fields are untouched.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    /// `light` or `dark`.
    pub theme: Option<String>,
    /// Opaque language tag.
    pub language: Option<String>,
}

/// Fetch the current preferences.
#[get("/preferences")]
pub async fn get_preferences(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Preferences>> {
    session.require_authenticated()?;
    let preferences = state.store()?.preferences().clone();
    Ok(web::Json(preferences))
}

/// Apply the supplied fields.
///
/// The theme is parsed before anything changes, so an invalid theme leaves
/// the language untouched too.
#[put("/preferences")]
pub async fn update_preferences(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PreferencesRequest>,
) -> ApiResult<web::Json<Preferences>> {
    session.require_authenticated()?;
    let PreferencesRequest {
        theme: raw_theme,
        language,
    } = payload.into_inner();
    let theme = raw_theme
        .map(|raw| raw.parse::<Theme>())
        .transpose()
        .map_err(|err| theme_error(&err))?;

    let mut store = state.store()?;
    let preferences = store.preferences_mut();
    if let Some(next) = theme {
        preferences.set_theme(next);
    }
    if let Some(tag) = language {
        preferences.set_language(tag);
    }
    debug!(theme = %preferences.theme(), language = preferences.language(), "preferences updated");
    Ok(web::Json(preferences.clone()))
}

/// Flip between light and dark.
#[post("/preferences/theme/toggle")]
pub async fn toggle_theme(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Preferences>> {
    session.require_authenticated()?;
    let mut store = state.store()?;
    let preferences = store.preferences_mut();
    preferences.toggle_theme();
    Ok(web::Json(preferences.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{signed_in_state, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(get_preferences)
                .service(update_preferences)
                .service(toggle_theme),
        )
    }

    #[actix_web::test]
    async fn anonymous_viewers_are_rejected() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/preferences")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn defaults_then_partial_update() {
        let app = actix_test::init_service(test_app(signed_in_state())).await;

        let initial: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/preferences")
                .to_request(),
        )
        .await;
        assert_eq!(
            initial,
            json!({ "theme": "light", "language": "zh-CN", "loading": false })
        );

        let updated: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/preferences")
                .set_json(json!({ "language": "en-US" }))
                .to_request(),
        )
        .await;
        assert_eq!(updated["language"], json!("en-US"));
        assert_eq!(updated["theme"], json!("light"));
    }

    #[actix_web::test]
    async fn toggle_flips_the_theme() {
        let app = actix_test::init_service(test_app(signed_in_state())).await;
        let request = || {
            actix_test::TestRequest::post()
                .uri("/api/v1/preferences/theme/toggle")
                .to_request()
        };

        let first: Value = actix_test::call_and_read_body_json(&app, request()).await;
        let second: Value = actix_test::call_and_read_body_json(&app, request()).await;
        assert_eq!(first["theme"], json!("dark"));
        assert_eq!(second["theme"], json!("light"));
    }

    #[actix_web::test]
    async fn unknown_theme_changes_nothing() {
        let state = signed_in_state();
        let app = actix_test::init_service(test_app(state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/preferences")
                .set_json(json!({ "theme": "sepia", "language": "fr-FR" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let store = state.store().expect("lock");
        assert_eq!(store.preferences().language(), "zh-CN");
        assert_eq!(store.preferences().theme(), Theme::Light);
    }
}
