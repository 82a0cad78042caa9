//! HTTP surface for the relay

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use doodle_ipc::{GUESS_ROUTE, GuessRequest, GuessResponse};
use tracing::error;

use crate::{GuessError, GuessRelay};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Build the relay's router
pub fn router(relay: Arc<GuessRelay>) -> Router {
    Router::new()
        .route(GUESS_ROUTE, post(guess_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(relay)
}

/// `POST /api/guess`
///
/// The body is decoded by hand so that malformed JSON is reported like any
/// other internal failure rather than with the framework's rejection.
async fn guess_handler(State(relay): State<Arc<GuessRelay>>, body: Bytes) -> Response {
    let result = match GuessRequest::from_json(&body) {
        Ok(request) => run_guess(relay, request).await,
        Err(e) => {
            error!(error = %e, "Malformed guess request");
            Err(GuessError::Internal(e.to_string()))
        }
    };

    match result {
        Ok(guess) => (StatusCode::OK, Json(GuessResponse { guess })).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Run the relay in its own task so a panic surfaces as an internal error
async fn run_guess(relay: Arc<GuessRelay>, request: GuessRequest) -> Result<String, GuessError> {
    let task = tokio::spawn(async move { relay.guess(request.image_data.as_deref()).await });
    match task.await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Guess task failed");
            Err(GuessError::Internal(e.to_string()))
        }
    }
}

impl IntoResponse for GuessError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Guess failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_passed_through() {
        let response = GuessError::Upstream {
            status: 429,
            status_text: "Too Many Requests".into(),
            body: "rate limited".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        assert_eq!(
            GuessError::InvalidInput.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
