//! CLI command implementations.

pub mod deposit;
pub mod emi;

// Re-export submodules for convenience
pub use deposit::DepositArgs;
pub use emi::EmiArgs;

/// Formats a tenure in months as years and months.
pub fn describe_tenure(months: u32) -> String {
    let (years, months) = (months / 12, months % 12);
    match (years, months) {
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{} {}", plural(y, "year"), plural(m, "month")),
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
