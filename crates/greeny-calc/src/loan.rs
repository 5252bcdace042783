//! Loan EMI calculation.
//!
//! The equated monthly instalment for a loan of principal `P` at monthly
//! rate `r` over `n` months:
//!
//! ```text
//! EMI = P × r × (1 + r)^n / ((1 + r)^n − 1)
//! ```
//!
//! With a zero rate the formula degenerates to `P / n`.

use serde::{Deserialize, Serialize};

use crate::error::{
    ensure_non_negative, ensure_positive, ensure_representable, CalcError, CalcResult,
};

/// Inputs to the EMI calculator, as collected by the loan calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInputs {
    /// Amount borrowed, in currency units.
    pub principal: f64,
    /// Annual interest rate as a percentage (10.0 for 10%).
    pub annual_rate_percent: f64,
    /// Loan tenure in months.
    pub tenure_months: u32,
}

impl LoanInputs {
    /// Creates a new set of loan inputs.
    pub fn new(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_months,
        }
    }

    /// Runs the EMI calculation for these inputs.
    pub fn compute(&self) -> CalcResult<LoanResult> {
        compute_loan_emi(self.principal, self.annual_rate_percent, self.tenure_months)
    }
}

/// EMI breakdown for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    /// Equated monthly instalment.
    pub monthly_payment: f64,
    /// Interest paid over the life of the loan.
    pub total_interest: f64,
    /// Sum of all instalments.
    pub total_payment: f64,
}

/// Calculates the EMI breakdown for a loan.
///
/// # Arguments
///
/// * `principal` - Amount borrowed, must be positive
/// * `annual_rate_percent` - Annual rate in percent, must be non-negative
/// * `tenure_months` - Number of monthly instalments, must be positive
///
/// # Example
///
/// ```rust
/// use greeny_calc::compute_loan_emi;
///
/// let result = compute_loan_emi(100_000.0, 10.0, 12).unwrap();
/// assert!((result.monthly_payment - 8791.59).abs() < 0.01);
/// ```
pub fn compute_loan_emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> CalcResult<LoanResult> {
    let principal = ensure_positive("principal", principal)?;
    let annual_rate_percent = ensure_non_negative("annualRatePercent", annual_rate_percent)?;
    if tenure_months == 0 {
        return Err(CalcError::invalid_input(
            "tenureMonths",
            "must be at least one month",
        ));
    }

    let n = f64::from(tenure_months);
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;

    let monthly_payment = if monthly_rate == 0.0 {
        principal / n
    } else {
        // P·r / (1 - (1 + r)^-n); the discount factor cannot overflow.
        let log_growth = n * monthly_rate.ln_1p();
        principal * monthly_rate / -(-log_growth).exp_m1()
    };

    let total_payment = ensure_representable("principal", monthly_payment * n)?;
    let total_interest = total_payment - principal;

    Ok(LoanResult {
        monthly_payment,
        total_interest,
        total_payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reference_loan() {
        let result = compute_loan_emi(100_000.0, 10.0, 12).unwrap();

        assert_relative_eq!(result.monthly_payment, 8791.59, epsilon = 0.01);
        assert_relative_eq!(result.total_payment, 105_499.06, epsilon = 0.05);
        assert_relative_eq!(result.total_interest, 5_499.06, epsilon = 0.05);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = compute_loan_emi(120_000.0, 0.0, 24).unwrap();

        assert_eq!(result.monthly_payment, 120_000.0 / 24.0);
        assert_relative_eq!(result.total_interest, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_payment, 120_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_month_loan() {
        // One instalment repays principal plus one month of interest.
        let result = compute_loan_emi(50_000.0, 12.0, 1).unwrap();
        assert_relative_eq!(result.monthly_payment, 50_500.0, epsilon = 1e-6);
        assert_relative_eq!(result.total_interest, 500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_long_tenure_converges_to_interest_only() {
        // 1% a month for 100,000 months: the payment is the monthly interest.
        let result = compute_loan_emi(100_000.0, 12.0, 100_000).unwrap();

        assert!(result.monthly_payment.is_finite());
        assert_relative_eq!(result.monthly_payment, 1_000.0, epsilon = 1e-6);
        assert!(result.total_payment >= 100_000.0);
        assert_relative_eq!(
            result.total_interest,
            result.total_payment - 100_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_unrepresentable_total_is_rejected() {
        let err = compute_loan_emi(f64::MAX / 2.0, 1000.0, 4_000_000_000).unwrap_err();
        assert_eq!(err.field(), "principal");
    }

    #[test]
    fn test_inputs_compute_matches_function() {
        let inputs = LoanInputs::new(250_000.0, 8.5, 60);
        assert_eq!(
            inputs.compute().unwrap(),
            compute_loan_emi(250_000.0, 8.5, 60).unwrap()
        );
    }

    #[test]
    fn test_rejects_out_of_domain_arguments() {
        for (principal, rate, tenure, field) in [
            (0.0, 10.0, 12, "principal"),
            (-5.0, 10.0, 12, "principal"),
            (f64::NAN, 10.0, 12, "principal"),
            (f64::INFINITY, 10.0, 12, "principal"),
            (1000.0, f64::NAN, 12, "annualRatePercent"),
            (1000.0, -1.0, 12, "annualRatePercent"),
            (1000.0, 10.0, 0, "tenureMonths"),
        ] {
            let err = compute_loan_emi(principal, rate, tenure).unwrap_err();
            assert_eq!(err.field(), field, "inputs ({principal}, {rate}, {tenure})");
        }
    }

    #[test]
    fn test_wire_shape() {
        let inputs: LoanInputs = serde_json::from_str(
            r#"{"principal": 100000, "annualRatePercent": 10, "tenureMonths": 12}"#,
        )
        .unwrap();
        assert_eq!(inputs, LoanInputs::new(100_000.0, 10.0, 12));

        let json = serde_json::to_value(inputs.compute().unwrap()).unwrap();
        assert!(json.get("monthlyPayment").is_some());
        assert!(json.get("totalInterest").is_some());
        assert!(json.get("totalPayment").is_some());
    }

    proptest! {
        #[test]
        fn prop_total_payment_covers_principal(
            principal in 1.0f64..10_000_000.0,
            rate in 0.0f64..40.0,
            tenure in 1u32..1_000_000,
        ) {
            let result = compute_loan_emi(principal, rate, tenure).unwrap();
            let tolerance = result.total_payment * 1e-9;

            prop_assert!(result.total_payment + tolerance >= principal);
            prop_assert!(
                (result.total_interest - (result.total_payment - principal)).abs() <= tolerance
            );
            prop_assert!(
                (result.total_payment - result.monthly_payment * f64::from(tenure)).abs()
                    <= tolerance
            );
        }

        #[test]
        fn prop_positive_rate_accrues_interest(
            principal in 1.0f64..10_000_000.0,
            rate in 0.5f64..40.0,
            tenure in 2u32..480,
        ) {
            let result = compute_loan_emi(principal, rate, tenure).unwrap();
            prop_assert!(result.total_payment > principal);
        }
    }
}
