//! Inquiry categories offered on the contact form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// What the submitter is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryType {
    /// Personal loan.
    PersonalLoan,
    /// Loan against gold.
    GoldLoan,
    /// Vehicle loan.
    VehicleLoan,
    /// Business loan.
    BusinessLoan,
    /// Fixed deposit.
    FixedDeposit,
    /// Recurring deposit.
    RecurringDeposit,
    /// Anything else.
    General,
}

impl InquiryType {
    /// All categories, in the order the form lists them.
    pub const ALL: [InquiryType; 7] = [
        InquiryType::PersonalLoan,
        InquiryType::GoldLoan,
        InquiryType::VehicleLoan,
        InquiryType::BusinessLoan,
        InquiryType::FixedDeposit,
        InquiryType::RecurringDeposit,
        InquiryType::General,
    ];

    /// Wire value, e.g. `gold-loan`.
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::PersonalLoan => "personal-loan",
            InquiryType::GoldLoan => "gold-loan",
            InquiryType::VehicleLoan => "vehicle-loan",
            InquiryType::BusinessLoan => "business-loan",
            InquiryType::FixedDeposit => "fixed-deposit",
            InquiryType::RecurringDeposit => "recurring-deposit",
            InquiryType::General => "general",
        }
    }

    /// Label shown to people, e.g. `Gold Loan`.
    pub fn label(&self) -> &'static str {
        match self {
            InquiryType::PersonalLoan => "Personal Loan",
            InquiryType::GoldLoan => "Gold Loan",
            InquiryType::VehicleLoan => "Vehicle Loan",
            InquiryType::BusinessLoan => "Business Loan",
            InquiryType::FixedDeposit => "Fixed Deposit",
            InquiryType::RecurringDeposit => "Recurring Deposit",
            InquiryType::General => "General Inquiry",
        }
    }
}

impl fmt::Display for InquiryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownInquiryType(s.to_string()))
    }
}
