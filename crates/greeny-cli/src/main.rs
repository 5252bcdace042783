//! Greeny CLI - loan and deposit calculators.
//!
//! # Usage
//!
//! ```bash
//! # Monthly instalment of a 1 lakh loan at 10% over 12 months
//! greeny emi --principal 100000 --rate 10 --tenure 12
//!
//! # Fixed deposit maturity
//! greeny deposit --kind fd --amount 10000 --rate 6 --years 1
//!
//! # Recurring deposit, JSON output
//! greeny --format json deposit --kind rd --amount 1000 --rate 6 --months 12
//! ```

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up output format
    let format = cli.format;

    // Execute command
    let result = match cli.command {
        Commands::Emi(args) => commands::emi::execute(args, format),
        Commands::Deposit(args) => commands::deposit::execute(args, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
