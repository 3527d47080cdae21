//! Error types for the REST layer.
//!
//! Handler failures are classified by kind only. The HTTP status is decided when the
//! error is rendered, from the action that failed and the configured [`ErrorPolicy`]:
//!
//! | Error | Compatible | Strict |
//! |-------|------------|--------|
//! | InvalidIdentifier (read) | 500 | 400 |
//! | InvalidIdentifier (update, delete) | 400 | 400 |
//! | Decode | 500 | 400 |
//! | NotFound | 500 | 404 |
//! | Store | 500 | 500 |
//! | HostResolution | 500 | 500 |
//!
//! Bodies are the plain-text error message.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use enrollment_core::{context::Action, error::StoreError};
use thiserror::Error;
use tracing::{error, warn};

use crate::config::ErrorPolicy;

/// Plain-text content type used for error bodies.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Error, Debug)]
pub enum RestError {
    /// The path id is not a 24-character hex identifier.
    #[error("{0}")]
    InvalidIdentifier(String),

    /// The request body is not a decodable resource.
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    NotFound(String),

    /// Any other store or serialization failure.
    #[error("{0}")]
    Store(String),

    /// The host for the `Location` header could not be determined.
    #[error("Could not resolve hostname: {0}")]
    HostResolution(String),
}

pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn decode(err: serde_json::Error) -> Self {
        RestError::Decode(err.to_string())
    }

    /// Status code for this error when raised by `action` under `policy`.
    pub fn status_code(&self, action: Action, policy: ErrorPolicy) -> StatusCode {
        match (self, policy) {
            (RestError::InvalidIdentifier(_), ErrorPolicy::Strict) => StatusCode::BAD_REQUEST,
            (RestError::InvalidIdentifier(_), ErrorPolicy::Compatible) if action != Action::Read => {
                StatusCode::BAD_REQUEST
            }
            (RestError::Decode(_), ErrorPolicy::Strict) => StatusCode::BAD_REQUEST,
            (RestError::NotFound(_), ErrorPolicy::Strict) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Binds this error to the action that raised it so it can be rendered.
    pub fn into_failure(self, action: Action, policy: ErrorPolicy) -> Failure {
        Failure { error: self, action, policy }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidIdentifier(_) => RestError::InvalidIdentifier(err.to_string()),
            StoreError::NotFound(_, _) => RestError::NotFound(err.to_string()),
            _ => RestError::Store(err.to_string()),
        }
    }
}

/// A [`RestError`] together with the context needed to pick its status code.
#[derive(Debug)]
pub struct Failure {
    pub error: RestError,
    pub action: Action,
    pub policy: ErrorPolicy,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = self.error.status_code(self.action, self.policy);
        let message = self.error.to_string();

        if status.is_server_error() {
            error!(action = %self.action, status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(action = %self.action, status = status.as_u16(), error = %message, "Request rejected");
        }

        (
            status,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(TEXT_CONTENT_TYPE)),
                (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
            ],
            message,
        )
            .into_response()
    }
}
