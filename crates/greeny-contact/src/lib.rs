//! # Greeny Contact
//!
//! The contact form pipeline of the Greeny Credit website.
//!
//! A submission moves through `Received → Validated → Rendered → Delivered`.
//! Validation failures stop it at `Rejected`; transport failures after
//! validation stop it at `DeliveryFailed`.
//!
//! - [`validation`]: field rules, reported all at once
//! - [`render`]: the organization notification and the submitter acknowledgment
//! - [`transport`]: the mail transport seam ([`MailConnector`], [`MailSession`])
//! - [`smtp`]: the SMTP implementation of that seam
//! - [`pipeline`]: orchestration with a scoped, time-bounded session
//!
//! ## Example
//!
//! ```rust
//! use greeny_contact::{validate, RawSubmission};
//!
//! let raw = RawSubmission {
//!     name: Some("Asha Rao".into()),
//!     email: Some("Asha.Rao@Example.com".into()),
//!     inquiry_type: Some("gold-loan".into()),
//!     message: Some("Please call me about gold loan rates.".into()),
//!     consent: Some(true.into()),
//!     ..Default::default()
//! };
//!
//! let submission = validate(&raw).unwrap();
//! assert_eq!(submission.email().as_str(), "asha.rao@example.com");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod email;
pub mod error;
pub mod inquiry;
pub mod phone;
pub mod pipeline;
pub mod render;
pub mod smtp;
pub mod submission;
pub mod transport;
pub mod validation;

pub use email::EmailAddress;
pub use error::{DeliveryError, DomainError, FieldError, TransportError};
pub use inquiry::InquiryType;
pub use phone::PhoneNumber;
pub use pipeline::{ContactPipeline, FailureReason, SubmissionOutcome};
pub use render::{render_acknowledgment, render_notification, EmailDocument, MailSettings, Mailbox};
pub use smtp::{SmtpConnector, SmtpSettings};
pub use submission::{ContactSubmission, RawSubmission};
pub use transport::{DeliveryReceipt, MailConnector, MailSession};
pub use validation::validate;
