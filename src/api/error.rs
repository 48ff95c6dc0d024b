//! Handler errors and their HTTP mapping.
//!
//! Bodies are plain text. A missing body field answers 404, not 400: clients
//! of this API already rely on that status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required query parameter is absent or empty.
    #[error("Bad request")]
    MissingParameter,

    /// The JSON body is unreadable or a required field is missing/falsy.
    #[error("Bad request")]
    BadBody,

    /// A string could not be parsed as a document identifier.
    #[error("Invalid id")]
    InvalidId,

    #[error("User not found")]
    UserNotFound,

    #[error("Car not found")]
    CarNotFound,

    #[error("User already exist")]
    UserExists,

    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter | ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::BadBody | ApiError::UserNotFound | ApiError::CarNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::UserExists => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(e) = &self {
            tracing::error!(error = %e, "Store operation failed");
        }
        (self.status(), self.to_string()).into_response()
    }
}
