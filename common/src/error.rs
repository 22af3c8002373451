//! Error taxonomy shared by the mixer and generator HTTP APIs.
//!
//! `spec.md` §7 groups failures into five classes (configuration,
//! authentication, invalid input, not-ready, upstream/fatal). Configuration
//! errors are handled at startup and never reach this enum; the remaining
//! four map to `ApiError` variants, each with a fixed status code and a
//! structured JSON body via `IntoResponse`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("authentication required")]
    MissingAuth,

    #[error("invalid authentication")]
    InvalidAuth,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not ready: {0}")]
    NotReady(String),

    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAuth => StatusCode::UNAUTHORIZED,
            ApiError::InvalidAuth => StatusCode::FORBIDDEN,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}
