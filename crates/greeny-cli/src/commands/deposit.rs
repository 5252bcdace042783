//! Deposit command implementation.
//!
//! Calculates the maturity value of fixed, recurring and daily recurring
//! deposits.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use greeny_calc::{format_inr, DepositInputs, DepositKind, DepositResult, Tenure};

use crate::cli::OutputFormat;
use crate::commands::describe_tenure;
use crate::error::CliError;
use crate::output::{print_report, KeyValue};

/// Arguments for the deposit command.
#[derive(Args, Debug)]
pub struct DepositArgs {
    /// Deposit product: fd, rd or drd
    #[arg(short, long)]
    pub kind: DepositKind,

    /// Amount in rupees: lump sum for fd, per month for rd, per day for drd
    #[arg(short, long)]
    pub amount: f64,

    /// Annual interest rate (as percentage, e.g., 6.5 for 6.5%)
    #[arg(short, long)]
    pub rate: f64,

    /// Tenure years
    #[arg(short, long, default_value = "0")]
    pub years: u32,

    /// Tenure months, added to the years
    #[arg(short, long, default_value = "0")]
    pub months: u32,
}

/// JSON report.
#[derive(Debug, Serialize)]
struct DepositReport {
    inputs: DepositInputs,
    result: DepositResult,
}

/// Execute the deposit command.
pub fn execute(args: DepositArgs, format: OutputFormat) -> Result<()> {
    let tenure = Tenure::new(args.years, args.months);
    let inputs = DepositInputs::new(args.kind, args.amount, args.rate, tenure.total_months());
    let result = inputs.compute().map_err(CliError::deposit)?;

    let kind = inputs.kind();
    let rows = vec![
        KeyValue::new("Product", kind.to_string()),
        KeyValue::rupees(kind.amount_label(), inputs.amount()),
        KeyValue::percent("Interest Rate", inputs.annual_rate_percent()),
        KeyValue::new("Tenure", describe_tenure(inputs.tenure_months())),
        KeyValue::separator(),
        KeyValue::rupees("Total Investment", result.total_investment),
        KeyValue::rupees("Interest Earned", result.interest_earned),
        KeyValue::rupees("Maturity Value", result.maturity_value),
    ];

    print_report(
        &format!("{kind} Maturity"),
        &rows,
        &format_inr(result.maturity_value),
        &DepositReport { inputs, result },
        format,
    )
}
