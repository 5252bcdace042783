//! Inbound and validated contact submissions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::email::EmailAddress;
use crate::inquiry::InquiryType;
use crate::phone::PhoneNumber;

/// A contact form submission exactly as received.
///
/// Every field is optional so that missing values surface as field errors
/// rather than as a body parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number, may be blank.
    #[serde(default)]
    pub phone: Option<String>,
    /// Inquiry category wire value.
    #[serde(default)]
    pub inquiry_type: Option<String>,
    /// Free-text message.
    #[serde(default)]
    pub message: Option<String>,
    /// Privacy policy consent; a boolean or a boolean-like string or number.
    #[serde(default)]
    pub consent: Option<Value>,
}

/// Reading of the loosely typed consent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Consent {
    Given,
    Refused,
    NotBoolean,
}

impl Consent {
    /// Interprets `true`/`false`, `"true"`/`"false"`, `"1"`/`"0"` and `1`/`0`.
    /// A missing value counts as refused.
    pub(crate) fn read(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Consent::Refused,
            Some(Value::Bool(true)) => Consent::Given,
            Some(Value::Bool(false)) => Consent::Refused,
            Some(Value::String(s)) => match s.trim() {
                "true" | "1" => Consent::Given,
                "false" | "0" => Consent::Refused,
                _ => Consent::NotBoolean,
            },
            Some(Value::Number(n)) => match n.as_u64() {
                Some(1) => Consent::Given,
                Some(0) => Consent::Refused,
                _ => Consent::NotBoolean,
            },
            Some(_) => Consent::NotBoolean,
        }
    }
}

/// A submission that passed every field rule.
///
/// Only [`validate`](crate::validate) constructs it, and only when the
/// submitter accepted the privacy policy. Strings are trimmed and the email
/// is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    name: String,
    email: EmailAddress,
    phone: Option<PhoneNumber>,
    inquiry_type: InquiryType,
    message: String,
}

impl ContactSubmission {
    pub(crate) fn new(
        name: String,
        email: EmailAddress,
        phone: Option<PhoneNumber>,
        inquiry_type: InquiryType,
        message: String,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            inquiry_type,
            message,
        }
    }

    /// Submitter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submitter's normalized email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Submitter's phone number, if one was given.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Inquiry category.
    pub fn inquiry_type(&self) -> InquiryType {
        self.inquiry_type
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}
