//! HTTP route handlers.

pub mod calculators;
pub mod contact;
pub mod health;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
