//! Field rules for contact submissions.
//!
//! Every field is checked on its own and all violations are returned
//! together, so the form can highlight each problem in one round trip.
//! Within a field only the first failing rule is reported.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::email::EmailAddress;
use crate::error::FieldError;
use crate::inquiry::InquiryType;
use crate::phone::PhoneNumber;
use crate::submission::{Consent, ContactSubmission, RawSubmission};

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern is valid"));

/// Allowed name length in characters, after trimming.
pub const NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=100;

/// Allowed message length in characters, after trimming.
pub const MESSAGE_LENGTH: std::ops::RangeInclusive<usize> = 10..=1000;

/// Validation messages, as shown to the submitter.
pub mod messages {
    /// Name outside the length bounds.
    pub const NAME_LENGTH: &str = "Name must be between 2 and 100 characters";
    /// Name with characters other than letters and spaces.
    pub const NAME_PATTERN: &str = "Name can only contain letters and spaces";
    /// Malformed email.
    pub const EMAIL: &str = "Please provide a valid email address";
    /// Malformed phone.
    pub const PHONE: &str = "Please provide a valid phone number";
    /// Unknown or missing inquiry category.
    pub const INQUIRY_TYPE: &str = "Please select a valid inquiry type";
    /// Message outside the length bounds.
    pub const MESSAGE_LENGTH: &str = "Message must be between 10 and 1000 characters";
    /// Consent given as something other than a boolean.
    pub const CONSENT_TYPE: &str = "Consent must be a boolean value";
    /// Consent missing or refused.
    pub const CONSENT_REQUIRED: &str = "You must accept the privacy policy";
}

/// Validate a raw submission.
///
/// Returns the validated submission, or every field error found. The
/// function is pure: validating the same input twice gives the same errors
/// in the same order.
pub fn validate(raw: &RawSubmission) -> Result<ContactSubmission, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = collect(&mut errors, "name", check_name(raw.name.as_deref()));
    let email = collect(&mut errors, "email", check_email(raw.email.as_deref()));
    let phone = collect(&mut errors, "phone", check_phone(raw.phone.as_deref()));
    let inquiry_type = collect(
        &mut errors,
        "inquiryType",
        check_inquiry_type(raw.inquiry_type.as_deref()),
    );
    let message = collect(&mut errors, "message", check_message(raw.message.as_deref()));
    collect(&mut errors, "consent", check_consent(raw));

    match (name, email, phone, inquiry_type, message) {
        (Some(name), Some(email), Some(phone), Some(inquiry_type), Some(message))
            if errors.is_empty() =>
        {
            Ok(ContactSubmission::new(
                name,
                email,
                phone,
                inquiry_type,
                message,
            ))
        }
        _ => Err(errors),
    }
}

fn collect<T>(
    errors: &mut Vec<FieldError>,
    field: &str,
    result: Result<T, &'static str>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(msg) => {
            errors.push(FieldError::new(field, msg));
            None
        }
    }
}

fn check_name(raw: Option<&str>) -> Result<String, &'static str> {
    let name = raw.unwrap_or_default().trim();
    if !NAME_LENGTH.contains(&name.chars().count()) {
        return Err(messages::NAME_LENGTH);
    }
    if !NAME.is_match(name) {
        return Err(messages::NAME_PATTERN);
    }
    Ok(name.to_string())
}

fn check_email(raw: Option<&str>) -> Result<EmailAddress, &'static str> {
    EmailAddress::parse(raw.unwrap_or_default()).map_err(|_| messages::EMAIL)
}

fn check_phone(raw: Option<&str>) -> Result<Option<PhoneNumber>, &'static str> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(phone) => PhoneNumber::parse(phone)
            .map(Some)
            .map_err(|_| messages::PHONE),
    }
}

fn check_inquiry_type(raw: Option<&str>) -> Result<InquiryType, &'static str> {
    raw.unwrap_or_default()
        .parse()
        .map_err(|_| messages::INQUIRY_TYPE)
}

fn check_message(raw: Option<&str>) -> Result<String, &'static str> {
    let message = raw.unwrap_or_default().trim();
    if !MESSAGE_LENGTH.contains(&message.chars().count()) {
        return Err(messages::MESSAGE_LENGTH);
    }
    Ok(message.to_string())
}

fn check_consent(raw: &RawSubmission) -> Result<(), &'static str> {
    match Consent::read(raw.consent.as_ref()) {
        Consent::Given => Ok(()),
        Consent::Refused => Err(messages::CONSENT_REQUIRED),
        Consent::NotBoolean => Err(messages::CONSENT_TYPE),
    }
}
