//! Contact form endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use greeny_contact::{RawSubmission, SubmissionOutcome};

use crate::error::{messages, ApiError, ApiResult};
use crate::state::AppState;

/// Accepted submission response.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Validate, render and deliver a contact form submission.
///
/// Missing fields surface as field errors. A body that is not JSON, or has a
/// field of the wrong JSON type, is rejected as a whole.
pub async fn submit(
    State(state): State<AppState>,
    body: Result<Json<RawSubmission>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let Json(raw) = body.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Unreadable contact body");
        ApiError::InvalidBody(rejection.body_text())
    })?;

    match state.contact.handle_submission(&raw).await {
        SubmissionOutcome::Delivered(_) => Ok(Json(ContactResponse {
            success: true,
            message: messages::CONTACT_SUCCESS,
        })),
        SubmissionOutcome::Rejected(errors) => Err(ApiError::Validation(errors)),
        SubmissionOutcome::Failed(reason) => Err(reason.into()),
    }
}
