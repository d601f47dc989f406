//! Home screen actions.
//!
//! ```text
//! POST /api/v1/home/sample
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Outcome of the sample fetch: either the document or a failure message.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SampleResponse {
    /// The fetched document.
    pub data: Option<Value>,
    /// Why the fetch failed.
    pub error: Option<String>,
}

/// Fetch the sample document, showing the loading indicator meanwhile.
///
/// Remote failures are reported in the body, not as an error status.
#[post("/home/sample")]
pub async fn fetch_sample(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SampleResponse>> {
    session.require_authenticated()?;
    state.store()?.preferences_mut().set_loading(true);

    let outcome = state.sample.fetch_sample().await;

    state.store()?.preferences_mut().set_loading(false);
    let response = match outcome {
        Ok(data) => SampleResponse {
            data: Some(data),
            error: None,
        },
        Err(err) => {
            warn!(error = %err, "sample fetch failed");
            SampleResponse {
                data: None,
                error: Some(err.message().to_owned()),
            }
        }
    };
    Ok(web::Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::SampleSource;
    use crate::inbound::http::test_utils::signed_in_state;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct FailingSource;

    #[async_trait]
    impl SampleSource for FailingSource {
        async fn fetch_sample(&self) -> Result<Value, Error> {
            Err(Error::service_unavailable("network error: connection refused"))
        }
    }

    /// Records the loading flag observed while the fetch is in flight.
    struct ObservingSource(HttpState);

    #[async_trait]
    impl SampleSource for ObservingSource {
        async fn fetch_sample(&self) -> Result<Value, Error> {
            let loading = self.0.store()?.preferences().is_loading();
            Ok(json!({ "loadingDuringFetch": loading }))
        }
    }

    async fn call(state: HttpState) -> (StatusCode, SampleResponse) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(fetch_sample)),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/home/sample")
                .to_request(),
        )
        .await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn returns_the_fixture_document() {
        let state = signed_in_state();
        let (status, body) = call(state.clone()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.error, None);
        assert_eq!(body.data.and_then(|d| d.get("id").cloned()), Some(json!(1)));
        assert!(!state.store().expect("lock").preferences().is_loading());
    }

    #[actix_web::test]
    async fn failures_become_a_message() {
        let mut state = signed_in_state();
        state.sample = Arc::new(FailingSource);
        let (status, body) = call(state.clone()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.data, None);
        assert_eq!(
            body.error.as_deref(),
            Some("network error: connection refused")
        );
        assert!(!state.store().expect("lock").preferences().is_loading());
    }

    #[actix_web::test]
    async fn loading_is_shown_while_fetching() {
        let mut state = signed_in_state();
        state.sample = Arc::new(ObservingSource(state.clone()));
        let (_, body) = call(state).await;

        assert_eq!(body.data, Some(json!({ "loadingDuringFetch": true })));
    }
}
