//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{DepositArgs, EmiArgs};

/// Greeny Credit loan and deposit calculators
#[derive(Parser)]
#[command(name = "greeny")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Monthly instalment, total interest and total payment of a loan
    Emi(EmiArgs),

    /// Maturity value of a fixed, recurring or daily recurring deposit
    Deposit(DepositArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Minimal output (just the headline amount)
    Minimal,
}
