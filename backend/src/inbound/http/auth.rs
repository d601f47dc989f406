//! Login, logout and session handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"ada","password":"secret"}
//! POST /api/v1/logout
//! GET /api/v1/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LoginCredentials, LoginValidationError, SessionSnapshot, SessionUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_form_error;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"ada","password":"secret"}`
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account name.
    #[serde(default)]
    pub username: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token now held by the session.
    pub token: String,
    /// Profile of the signed-in user.
    pub user: SessionUser,
}

/// Authenticate and start a session.
///
/// The login service is awaited without holding the store lock; the
/// session is updated once it answers.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| login_form_error(&err))?;
    let outcome = state.login.authenticate(&credentials).await?;

    let response = LoginResponse {
        token: outcome.token.as_str().to_owned(),
        user: outcome.user.clone(),
    };
    state
        .store()?
        .session_mut()
        .login(outcome.token, outcome.user)?;
    info!(user_id = %response.user.id, "session started");
    Ok(web::Json(response))
}

/// End the session and forget the persisted token.
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state.store()?.session_mut().logout()?;
    info!("session ended");
    Ok(HttpResponse::NoContent().finish())
}

/// Current session state; never includes the token.
#[get("/session")]
pub async fn session(state: web::Data<HttpState>) -> ApiResult<web::Json<SessionSnapshot>> {
    let snapshot = state.store()?.session().snapshot();
    Ok(web::Json(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TEST_NOW_MILLIS, test_state_with};
    use crate::domain::SessionToken;
    use crate::domain::ports::{InMemoryTokenStore, TokenStore};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

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
                .service(login)
                .service(logout)
                .service(session),
        )
    }

    #[actix_web::test]
    async fn login_then_logout_round_trips_storage() {
        let storage = Arc::new(InMemoryTokenStore::default());
        let app = actix_test::init_service(test_app(test_state_with(storage.clone()))).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": "ada", "password": "secret" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let expected_token = format!("token_{TEST_NOW_MILLIS}");
        assert_eq!(body["token"], json!(expected_token));
        assert_eq!(body["user"]["email"], json!("ada@example.com"));
        assert_eq!(body["user"]["role"], json!("admin"));
        assert_eq!(
            storage.load().expect("load"),
            Some(SessionToken::new(expected_token))
        );

        let snapshot: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/session").to_request(),
        )
        .await;
        assert_eq!(snapshot["authenticated"], json!(true));
        assert!(snapshot.get("token").is_none());

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/api/v1/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(storage.load().expect("load"), None);

        let snapshot: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/session").to_request(),
        )
        .await;
        assert_eq!(
            snapshot,
            json!({ "authenticated": false, "currentUser": null })
        );
    }

    #[rstest]
    #[case("   ", "pw", "username", "empty_username")]
    #[case("ada", "", "password", "empty_password")]
    #[case("ada", "  ", "password", "empty_password")]
    #[actix_web::test]
    async fn blank_credentials_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let storage = Arc::new(InMemoryTokenStore::default());
        let app = actix_test::init_service(test_app(test_state_with(storage.clone()))).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: username.to_owned(),
                    password: password.to_owned(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], json!("invalid_request"));
        assert!(body["details"]["fields"].get(field).is_some());
        assert_eq!(body["details"]["codes"][field], json!(code));
        assert_eq!(storage.load().expect("load"), None);
    }
}
