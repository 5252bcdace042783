//! EmailAddress value object.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

static LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("local part pattern is valid")
});

static DOMAIN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("domain label pattern is valid")
});

static TOP_LEVEL_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9-]{1,59})$").expect("TLD pattern is valid")
});

const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_ADDRESS_LEN: usize = 254;

/// Providers whose local part carries a removable sub-address, with the
/// separator they use.
const SUBADDRESS_PROVIDERS: &[(&str, char)] = &[
    ("gmail.com", '+'),
    ("outlook.com", '+'),
    ("hotmail.com", '+'),
    ("live.com", '+'),
    ("icloud.com", '+'),
    ("me.com", '+'),
    ("mac.com", '+'),
    ("yahoo.com", '-'),
];

/// A validated, normalized email address.
///
/// Construction checks the address is RFC-shaped (dot-atom local part, a
/// dotted domain with an alphabetic top-level label) and stores it in
/// canonical form:
///
/// - the whole address is lower-cased
/// - sub-addresses (`+tag`, or `-tag` for Yahoo) are dropped for the large
///   providers that ignore them
/// - Gmail addresses lose the dots in their local part, and `googlemail.com`
///   becomes `gmail.com`
///
/// # Example
///
/// ```
/// use greeny_contact::EmailAddress;
///
/// let email = EmailAddress::parse("  Jane.Doe+news@GoogleMail.com ").unwrap();
/// assert_eq!(email.as_str(), "janedoe@gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    address: String,
    at: usize,
}

impl EmailAddress {
    /// Validate and normalize an address. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address is not RFC-shaped or
    /// normalizes to an empty local part.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let invalid = || DomainError::InvalidEmail(trimmed.to_string());

        if !Self::is_valid(trimmed) {
            return Err(invalid());
        }

        let (local, domain) = trimmed.rsplit_once('@').ok_or_else(invalid)?;
        let (local, domain) = normalize(local, domain);
        if local.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            at: local.len(),
            address: format!("{local}@{domain}"),
        })
    }

    /// Check the shape of an address without normalizing it.
    pub fn is_valid(email: &str) -> bool {
        if email.len() > MAX_ADDRESS_LEN {
            return false;
        }

        let Some((local, domain)) = email.rsplit_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > MAX_LOCAL_LEN || !LOCAL_PART.is_match(local) {
            return false;
        }

        if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
            return false;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return false;
        }

        let Some((tld, rest)) = labels.split_last() else {
            return false;
        };

        TOP_LEVEL_DOMAIN.is_match(tld) && rest.iter().all(|label| DOMAIN_LABEL.is_match(label))
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.address
    }

    /// Get the local part (before '@').
    pub fn local_part(&self) -> &str {
        &self.address[..self.at]
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        &self.address[self.at + 1..]
    }
}

fn normalize(local: &str, domain: &str) -> (String, String) {
    let mut local = local.to_lowercase();
    let mut domain = domain.to_lowercase();

    if domain == "googlemail.com" {
        domain = "gmail.com".to_string();
    }

    if let Some(&(_, separator)) = SUBADDRESS_PROVIDERS
        .iter()
        .find(|(provider, _)| *provider == domain)
    {
        if let Some(index) = local.find(separator) {
            local.truncate(index);
        }
    }

    if domain == "gmail.com" {
        local.retain(|c| c != '.');
    }

    (local, domain)
}

// Serde support - serialize as string
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.address.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}
