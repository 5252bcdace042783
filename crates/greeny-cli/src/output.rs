//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use greeny_calc::format_inr;

use crate::cli::OutputFormat;

/// Prints a calculation as a titled table, as JSON, or as its headline only.
pub fn print_report<T: Serialize>(
    title: &str,
    rows: &[KeyValue],
    headline: &str,
    json: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            print_table(rows);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(json)?),
        OutputFormat::Minimal => println!("{}", headline),
    }
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as rupees.
    pub fn rupees(key: impl Into<String>, amount: f64) -> Self {
        Self::new(key, format_inr(amount))
    }

    /// Creates a key-value pair formatted as an annual percentage.
    pub fn percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format!("{value}% p.a."))
    }

    /// Blank separator row.
    pub fn separator() -> Self {
        Self::new("", "")
    }
}
