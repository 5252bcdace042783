//! EMI command implementation.
//!
//! Calculates the equated monthly instalment of a loan.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use greeny_calc::{format_inr, LoanInputs, LoanResult};

use crate::cli::OutputFormat;
use crate::commands::describe_tenure;
use crate::error::CliError;
use crate::output::{print_report, KeyValue};

/// Arguments for the emi command.
#[derive(Args, Debug)]
pub struct EmiArgs {
    /// Loan amount in rupees
    #[arg(short, long)]
    pub principal: f64,

    /// Annual interest rate (as percentage, e.g., 10.5 for 10.5%)
    #[arg(short, long)]
    pub rate: f64,

    /// Tenure in months
    #[arg(short, long)]
    pub tenure: u32,
}

/// JSON report.
#[derive(Debug, Serialize)]
struct EmiReport {
    inputs: LoanInputs,
    result: LoanResult,
}

/// Execute the emi command.
pub fn execute(args: EmiArgs, format: OutputFormat) -> Result<()> {
    let inputs = LoanInputs::new(args.principal, args.rate, args.tenure);
    let result = inputs.compute().map_err(CliError::loan)?;

    let rows = vec![
        KeyValue::rupees("Loan Amount", inputs.principal),
        KeyValue::percent("Interest Rate", inputs.annual_rate_percent),
        KeyValue::new("Tenure", describe_tenure(inputs.tenure_months)),
        KeyValue::separator(),
        KeyValue::rupees("Monthly EMI", result.monthly_payment),
        KeyValue::rupees("Total Interest", result.total_interest),
        KeyValue::rupees("Total Payment", result.total_payment),
    ];

    print_report(
        "Loan EMI",
        &rows,
        &format_inr(result.monthly_payment),
        &EmiReport { inputs, result },
        format,
    )
}
