use api_shared::auth::AuthError;
use api_shared::dto::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ptb_core::PtbError;

/// Error returned by handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Maps a core error to a response.
    ///
    /// Validation and not-found messages are written for clinicians and pass through unchanged.
    /// Everything else is logged and replaced by `fallback`.
    pub fn from_core(err: PtbError, fallback: &str) -> Self {
        match err {
            PtbError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            PtbError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            PtbError::ClassifierTimeout(_) => {
                tracing::error!("{}", err);
                Self::new(StatusCode::GATEWAY_TIMEOUT, fallback)
            }
            other => {
                tracing::error!("{}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorRes {
                error: self.message,
            }),
        )
            .into_response()
    }
}
