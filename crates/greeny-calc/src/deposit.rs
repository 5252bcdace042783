//! Deposit maturity calculations.
//!
//! Three products are offered:
//!
//! - **Fixed deposit**: a lump sum compounded quarterly
//! - **Recurring deposit**: a monthly instalment compounded monthly
//! - **Daily recurring deposit**: a daily instalment compounded daily, with a
//!   month counted as 30 days and a year as 365 days
//!
//! Recurring products are valued as an annuity due:
//!
//! ```text
//! FV = A × ((1 + r)^n − 1) / r × (1 + r)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{
    ensure_non_negative, ensure_positive, ensure_representable, CalcError, CalcResult,
};

/// Days in a month for daily recurring deposits.
pub const DAYS_PER_MONTH: u32 = 30;

/// Day count basis for the daily rate.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Compounding periods per year for fixed deposits.
pub const FD_COMPOUNDING_PER_YEAR: f64 = 4.0;

/// Deposit product, identified on the website by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositKind {
    /// Fixed deposit (`fd`).
    #[serde(rename = "fd")]
    Fixed,
    /// Recurring deposit (`rd`).
    #[serde(rename = "rd")]
    Recurring,
    /// Daily recurring deposit (`drd`).
    #[serde(rename = "drd")]
    DailyRecurring,
}

impl DepositKind {
    /// All products, in display order.
    pub const ALL: [DepositKind; 3] = [
        DepositKind::Fixed,
        DepositKind::Recurring,
        DepositKind::DailyRecurring,
    ];

    /// Short code used by the deposit calculator form.
    pub fn code(&self) -> &'static str {
        match self {
            DepositKind::Fixed => "fd",
            DepositKind::Recurring => "rd",
            DepositKind::DailyRecurring => "drd",
        }
    }

    /// What the deposit amount means for this product.
    pub fn amount_label(&self) -> &'static str {
        match self {
            DepositKind::Fixed => "Principal Amount",
            DepositKind::Recurring => "Monthly Deposit",
            DepositKind::DailyRecurring => "Daily Deposit",
        }
    }
}

impl fmt::Display for DepositKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DepositKind::Fixed => "Fixed Deposit",
            DepositKind::Recurring => "Recurring Deposit",
            DepositKind::DailyRecurring => "Daily Recurring Deposit",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DepositKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fd" | "fixed" => Ok(DepositKind::Fixed),
            "rd" | "recurring" => Ok(DepositKind::Recurring),
            "drd" | "daily" => Ok(DepositKind::DailyRecurring),
            other => Err(CalcError::invalid_input(
                "type",
                format!("unknown deposit type '{other}', expected fd, rd or drd"),
            )),
        }
    }
}

/// Deposit tenure as entered on the form: years plus months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tenure {
    /// Whole years.
    #[serde(default)]
    pub years: u32,
    /// Additional months.
    #[serde(default)]
    pub months: u32,
}

impl Tenure {
    /// Creates a tenure from years and months.
    pub fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// Total tenure in months.
    pub fn total_months(&self) -> u32 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }
}

/// Inputs to the deposit calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DepositInputs {
    /// Lump sum compounded quarterly.
    #[serde(rename = "fd")]
    FixedDeposit {
        /// Amount deposited up front.
        principal: f64,
        /// Annual interest rate in percent.
        annual_rate_percent: f64,
        /// Tenure in months.
        tenure_months: u32,
    },
    /// Monthly instalments compounded monthly.
    #[serde(rename = "rd")]
    RecurringDeposit {
        /// Amount deposited every month.
        monthly_amount: f64,
        /// Annual interest rate in percent.
        annual_rate_percent: f64,
        /// Tenure in months.
        tenure_months: u32,
    },
    /// Daily instalments compounded daily.
    #[serde(rename = "drd")]
    DailyRecurringDeposit {
        /// Amount deposited every day.
        daily_amount: f64,
        /// Annual interest rate in percent.
        annual_rate_percent: f64,
        /// Tenure in months (30 days each).
        tenure_months: u32,
    },
}

impl DepositInputs {
    /// Builds inputs for any product from its kind.
    pub fn new(kind: DepositKind, amount: f64, annual_rate_percent: f64, tenure_months: u32) -> Self {
        match kind {
            DepositKind::Fixed => Self::fixed(amount, annual_rate_percent, tenure_months),
            DepositKind::Recurring => Self::recurring(amount, annual_rate_percent, tenure_months),
            DepositKind::DailyRecurring => {
                Self::daily_recurring(amount, annual_rate_percent, tenure_months)
            }
        }
    }

    /// Fixed deposit inputs.
    pub fn fixed(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> Self {
        Self::FixedDeposit {
            principal,
            annual_rate_percent,
            tenure_months,
        }
    }

    /// Recurring deposit inputs.
    pub fn recurring(monthly_amount: f64, annual_rate_percent: f64, tenure_months: u32) -> Self {
        Self::RecurringDeposit {
            monthly_amount,
            annual_rate_percent,
            tenure_months,
        }
    }

    /// Daily recurring deposit inputs.
    pub fn daily_recurring(daily_amount: f64, annual_rate_percent: f64, tenure_months: u32) -> Self {
        Self::DailyRecurringDeposit {
            daily_amount,
            annual_rate_percent,
            tenure_months,
        }
    }

    /// Product of these inputs.
    pub fn kind(&self) -> DepositKind {
        match self {
            Self::FixedDeposit { .. } => DepositKind::Fixed,
            Self::RecurringDeposit { .. } => DepositKind::Recurring,
            Self::DailyRecurringDeposit { .. } => DepositKind::DailyRecurring,
        }
    }

    /// Deposit amount: lump sum, monthly or daily depending on the product.
    pub fn amount(&self) -> f64 {
        match *self {
            Self::FixedDeposit { principal, .. } => principal,
            Self::RecurringDeposit { monthly_amount, .. } => monthly_amount,
            Self::DailyRecurringDeposit { daily_amount, .. } => daily_amount,
        }
    }

    /// Annual interest rate in percent.
    pub fn annual_rate_percent(&self) -> f64 {
        match *self {
            Self::FixedDeposit {
                annual_rate_percent,
                ..
            }
            | Self::RecurringDeposit {
                annual_rate_percent,
                ..
            }
            | Self::DailyRecurringDeposit {
                annual_rate_percent,
                ..
            } => annual_rate_percent,
        }
    }

    /// Tenure in months.
    pub fn tenure_months(&self) -> u32 {
        match *self {
            Self::FixedDeposit { tenure_months, .. }
            | Self::RecurringDeposit { tenure_months, .. }
            | Self::DailyRecurringDeposit { tenure_months, .. } => tenure_months,
        }
    }

    /// Runs the maturity calculation for these inputs.
    pub fn compute(&self) -> CalcResult<DepositResult> {
        compute_deposit_maturity(*self)
    }
}

/// Maturity breakdown for a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResult {
    /// Total amount deposited over the tenure.
    pub total_investment: f64,
    /// Interest earned at maturity.
    pub interest_earned: f64,
    /// Amount paid out at maturity.
    pub maturity_value: f64,
}

impl DepositResult {
    fn from_totals(total_investment: f64, maturity_value: f64) -> Self {
        Self {
            total_investment,
            interest_earned: maturity_value - total_investment,
            maturity_value,
        }
    }
}

/// Calculates the maturity value of a deposit.
///
/// A zero rate is accepted and yields no growth; negative rates, non-positive
/// amounts and zero tenures are rejected, as are combinations whose maturity
/// value overflows.
///
/// # Example
///
/// ```rust
/// use greeny_calc::{compute_deposit_maturity, DepositInputs};
///
/// let result = compute_deposit_maturity(DepositInputs::fixed(10_000.0, 6.0, 12)).unwrap();
/// assert!((result.maturity_value - 10_613.64).abs() < 0.01);
/// ```
pub fn compute_deposit_maturity(inputs: DepositInputs) -> CalcResult<DepositResult> {
    let amount = ensure_positive(amount_field(inputs.kind()), inputs.amount())?;
    let rate = ensure_non_negative("annualRatePercent", inputs.annual_rate_percent())? / 100.0;
    let months = inputs.tenure_months();
    if months == 0 {
        return Err(CalcError::invalid_input(
            "tenureMonths",
            "must be at least one month",
        ));
    }

    let (total_investment, maturity_value) = match inputs.kind() {
        DepositKind::Fixed => {
            let quarters = FD_COMPOUNDING_PER_YEAR * f64::from(months) / 12.0;
            let maturity = amount * (1.0 + rate / FD_COMPOUNDING_PER_YEAR).powf(quarters);
            (amount, maturity)
        }
        DepositKind::Recurring => {
            let periods = f64::from(months);
            (amount * periods, annuity_due(amount, rate / 12.0, periods))
        }
        DepositKind::DailyRecurring => {
            let days = f64::from(months) * f64::from(DAYS_PER_MONTH);
            (amount * days, annuity_due(amount, rate / DAYS_PER_YEAR, days))
        }
    };

    let field = amount_field(inputs.kind());
    Ok(DepositResult::from_totals(
        ensure_representable(field, total_investment)?,
        ensure_representable("tenureMonths", maturity_value)?,
    ))
}

fn amount_field(kind: DepositKind) -> &'static str {
    match kind {
        DepositKind::Fixed => "principal",
        DepositKind::Recurring => "monthlyAmount",
        DepositKind::DailyRecurring => "dailyAmount",
    }
}

/// Future value of `periods` instalments paid at the start of each period.
fn annuity_due(installment: f64, periodic_rate: f64, periods: f64) -> f64 {
    if periodic_rate == 0.0 {
        return installment * periods;
    }
    let growth_minus_one = (periods * periodic_rate.ln_1p()).exp_m1();
    installment * growth_minus_one / periodic_rate * (1.0 + periodic_rate)
}
