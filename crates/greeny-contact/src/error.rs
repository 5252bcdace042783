//! Error types for the contact pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field rule violation, reported back to the submitter.
///
/// Serializes as `{"field": ..., "msg": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field (`name`, `email`, `inquiryType`, ...).
    pub field: String,
    /// Human-readable reason.
    pub msg: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            msg: msg.into(),
        }
    }
}

/// Errors raised when constructing domain value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The email address is not RFC-shaped.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The phone number contains characters other than digits and punctuation.
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    /// The inquiry type is not one of the offered categories.
    #[error("unknown inquiry type: {0}")]
    UnknownInquiryType(String),
}

/// Failure reported by a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection could not be configured or established.
    #[error("failed to connect to mail server: {0}")]
    Connect(String),

    /// The server did not pass the readiness check.
    #[error("mail server verification failed: {0}")]
    Verify(String),

    /// A rendered document could not be turned into a message.
    #[error("failed to build message: {0}")]
    Message(String),

    /// The server refused or dropped the message.
    #[error("failed to send message: {0}")]
    Send(String),
}

/// Delivery of a rendered submission failed.
///
/// A failure of the acknowledgment after the notification went out is
/// reported the same way as a failure of the notification itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The transport reported an error.
    #[error("mail transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The attempt did not finish within the configured timeout.
    #[error("mail delivery timed out after {0:?}")]
    TimedOut(Duration),
}
