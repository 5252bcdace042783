//! Mail transport seam.
//!
//! A [`MailConnector`] opens one [`MailSession`] per submission. The pipeline
//! verifies the session, sends the two documents in order and always closes
//! it, whether the sequence succeeded or not.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TransportError;
use crate::render::EmailDocument;

/// Opens mail sessions.
#[async_trait]
pub trait MailConnector: Send + Sync {
    /// Connect to the mail service.
    async fn open(&self) -> Result<Box<dyn MailSession>, TransportError>;
}

/// A connected mail session.
#[async_trait]
pub trait MailSession: Send {
    /// Check the server is reachable and accepts our credentials.
    async fn verify(&mut self) -> Result<(), TransportError>;

    /// Send one document.
    async fn send(&mut self, document: &EmailDocument) -> Result<(), TransportError>;

    /// Release the session. Never fails; problems are logged.
    async fn close(self: Box<Self>);
}

/// Proof that both documents were handed to the mail service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    /// Where the organization notification went.
    pub notification_to: String,
    /// Where the acknowledgment went.
    pub acknowledgment_to: String,
    /// When the last send completed.
    pub delivered_at: DateTime<Utc>,
}
