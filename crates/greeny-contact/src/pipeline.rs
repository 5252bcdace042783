//! Submission orchestration: validate, render, deliver.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, warn};

use crate::error::{DeliveryError, FieldError, TransportError};
use crate::render::{render_acknowledgment, render_notification, EmailDocument, MailSettings};
use crate::submission::RawSubmission;
use crate::transport::{DeliveryReceipt, MailConnector, MailSession};
use crate::validation::validate;

/// Default bound on one delivery attempt.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Why an accepted submission could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The mail service failed or timed out.
    Delivery,
    /// Something on our side went wrong, e.g. an unbuildable message.
    Internal,
}

impl From<&DeliveryError> for FailureReason {
    fn from(err: &DeliveryError) -> Self {
        match err {
            DeliveryError::Transport(TransportError::Message(_)) => FailureReason::Internal,
            DeliveryError::Transport(_) | DeliveryError::TimedOut(_) => FailureReason::Delivery,
        }
    }
}

/// Result of handling one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Both emails were accepted by the mail service.
    Delivered(DeliveryReceipt),
    /// One or more fields failed validation.
    Rejected(Vec<FieldError>),
    /// The submission was valid but could not be delivered.
    Failed(FailureReason),
}

impl SubmissionOutcome {
    /// Whether the submission was delivered.
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Delivered(_))
    }
}

/// The contact pipeline.
///
/// Holds the mail connector and addressing settings; cheap to share behind
/// an `Arc` across request handlers.
pub struct ContactPipeline {
    connector: Arc<dyn MailConnector>,
    settings: MailSettings,
    timeout: Duration,
}

impl ContactPipeline {
    /// Create a pipeline with the default delivery timeout.
    pub fn new(connector: Arc<dyn MailConnector>, settings: MailSettings) -> Self {
        Self {
            connector,
            settings,
            timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    /// Set the bound on one delivery attempt.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Addressing settings.
    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    /// Delivery timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validate, render and deliver one submission.
    ///
    /// Never fails: every problem is folded into the returned outcome and
    /// delivery errors are logged in full.
    pub async fn handle_submission(&self, raw: &RawSubmission) -> SubmissionOutcome {
        let submission = match validate(raw) {
            Ok(submission) => submission,
            Err(errors) => {
                warn!(
                    fields = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                    "Contact submission rejected"
                );
                return SubmissionOutcome::Rejected(errors);
            }
        };

        let submitted_at = Utc::now();
        let notification = render_notification(&submission, &self.settings, submitted_at);
        let acknowledgment = render_acknowledgment(&submission, &self.settings, submitted_at);

        match self.deliver(&notification, &acknowledgment).await {
            Ok(receipt) => {
                info!(
                    name = %submission.name(),
                    email = %submission.email(),
                    timestamp = %submitted_at.to_rfc3339(),
                    "Contact form submitted successfully"
                );
                SubmissionOutcome::Delivered(receipt)
            }
            Err(err) => {
                error!(
                    error = %err,
                    email = %submission.email(),
                    "Error sending contact form emails"
                );
                SubmissionOutcome::Failed(FailureReason::from(&err))
            }
        }
    }

    /// Deliver the notification and then the acknowledgment over one session.
    ///
    /// The session is verified first and closed on every exit path. The
    /// acknowledgment is only sent once the notification was accepted. Open,
    /// verify and both sends share one deadline.
    pub async fn deliver(
        &self,
        notification: &EmailDocument,
        acknowledgment: &EmailDocument,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let deadline = Instant::now() + self.timeout;

        let mut session = timeout_at(deadline, self.connector.open())
            .await
            .map_err(|_| DeliveryError::TimedOut(self.timeout))??;

        let exchanged = timeout_at(
            deadline,
            exchange(session.as_mut(), notification, acknowledgment),
        )
        .await;
        session.close().await;
        debug!("Mail session closed");

        exchanged.map_err(|_| DeliveryError::TimedOut(self.timeout))??;

        Ok(DeliveryReceipt {
            notification_to: notification.to.address.clone(),
            acknowledgment_to: acknowledgment.to.address.clone(),
            delivered_at: Utc::now(),
        })
    }
}

async fn exchange(
    session: &mut dyn MailSession,
    notification: &EmailDocument,
    acknowledgment: &EmailDocument,
) -> Result<(), TransportError> {
    session.verify().await?;
    session.send(notification).await?;
    session.send(acknowledgment).await?;
    Ok(())
}

impl std::fmt::Debug for ContactPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactPipeline")
            .field("settings", &self.settings)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
