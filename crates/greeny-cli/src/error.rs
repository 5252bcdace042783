//! CLI error types.

use greeny_calc::CalcError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A calculator input was out of range.
    #[error("Invalid {flag}: {reason}")]
    InvalidInput {
        /// Command-line flag carrying the value.
        flag: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Rejected `emi` input, named by its flag.
    pub fn loan(err: CalcError) -> Self {
        let flag = match err.field() {
            "principal" => "--principal",
            "annualRatePercent" => "--rate",
            "tenureMonths" => "--tenure",
            _ => "input",
        };
        Self::invalid(flag, err)
    }

    /// Rejected `deposit` input, named by its flag.
    pub fn deposit(err: CalcError) -> Self {
        let flag = match err.field() {
            "principal" | "monthlyAmount" | "dailyAmount" => "--amount",
            "annualRatePercent" => "--rate",
            "tenureMonths" => "--years/--months",
            "type" => "--kind",
            _ => "input",
        };
        Self::invalid(flag, err)
    }

    fn invalid(flag: &'static str, err: CalcError) -> Self {
        let CalcError::InvalidInput { reason, .. } = err;
        CliError::InvalidInput { flag, reason }
    }
}
