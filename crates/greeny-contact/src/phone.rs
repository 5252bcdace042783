//! PhoneNumber value object.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9()\-\s]+$").expect("phone pattern is valid"));

/// A phone number as typed on the contact form.
///
/// An optional leading `+` followed by digits, parentheses, hyphens and
/// spaces, with at least one digit. The number is stored trimmed but
/// otherwise as entered.
///
/// # Example
///
/// ```
/// use greeny_contact::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+91 (80) 2345-6789").unwrap();
/// assert_eq!(phone.digits_only(), "918023456789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate a phone number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhone` if the number has no digits or
    /// contains other characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let phone = raw.trim();

        if !Self::is_valid(phone) {
            return Err(DomainError::InvalidPhone(phone.to_string()));
        }

        Ok(Self(phone.to_string()))
    }

    /// Validate phone format.
    pub fn is_valid(phone: &str) -> bool {
        PHONE.is_match(phone) && phone.chars().any(|c| c.is_ascii_digit())
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
