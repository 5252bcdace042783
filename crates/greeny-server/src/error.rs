//! API error responses.
//!
//! Every error body has the shape `{"success": false, "message": ...}`;
//! validation failures add an `errors` array. Internal detail never reaches
//! the client.

use std::time::Duration;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use greeny_calc::CalcError;
use greeny_contact::{FailureReason, FieldError};

/// Client-facing messages.
pub mod messages {
    /// Contact submission accepted.
    pub const CONTACT_SUCCESS: &str =
        "Your inquiry has been submitted successfully. We will get back to you soon!";
    /// One or more fields failed validation.
    pub const VALIDATION_FAILED: &str = "Validation failed";
    /// Body was not a JSON object of the expected shape.
    pub const INVALID_BODY: &str = "Invalid request body";
    /// Rate limit exhausted.
    pub const RATE_LIMITED: &str = "Too many requests from this IP, please try again later.";
    /// Mail could not be delivered.
    pub const DELIVERY_FAILED: &str =
        "There was an error sending your message. Please try again later or contact us directly.";
    /// No route matched.
    pub const NOT_FOUND: &str = "Endpoint not found";
    /// Anything unexpected.
    pub const INTERNAL: &str = "Internal server error";
}

/// Errors returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Field-level validation failures.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The request body could not be read as the expected JSON.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Calculator input out of domain.
    #[error(transparent)]
    Calculator(#[from] CalcError),

    /// Too many requests from one client.
    #[error("rate limited, retry after {0:?}")]
    RateLimited(Duration),

    /// Contact emails could not be delivered.
    #[error("mail delivery failed")]
    Delivery,

    /// No route matched.
    #[error("endpoint not found")]
    NotFound,

    /// Unexpected failure.
    #[error("internal server error")]
    Internal,
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<FailureReason> for ApiError {
    fn from(reason: FailureReason) -> Self {
        match reason {
            FailureReason::Delivery => ApiError::Delivery,
            // The client sees the same message either way.
            FailureReason::Internal => ApiError::Delivery,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    /// Body with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) | ApiError::Calculator(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Delivery | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errors) => ErrorResponse {
                errors: Some(errors.clone()),
                ..ErrorResponse::new(messages::VALIDATION_FAILED)
            },
            ApiError::InvalidBody(_) => ErrorResponse::new(messages::INVALID_BODY),
            ApiError::Calculator(err) => ErrorResponse::new(err.to_string()),
            ApiError::RateLimited(_) => ErrorResponse::new(messages::RATE_LIMITED),
            ApiError::Delivery => ErrorResponse::new(messages::DELIVERY_FAILED),
            ApiError::NotFound => ErrorResponse::new(messages::NOT_FOUND),
            ApiError::Internal => ErrorResponse::new(messages::INTERNAL),
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::RateLimited(retry_after) = self {
            // Round up so clients never retry early.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            if let Ok(value) = HeaderValue::from_str(&secs.max(1).to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
