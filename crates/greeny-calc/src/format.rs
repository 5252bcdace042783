//! Display formatting for calculator results.

/// Formats an amount in rupees with two decimals, e.g. `₹ 8791.59`.
///
/// Non-finite amounts render as `₹ --`.
pub fn format_inr(amount: f64) -> String {
    if amount.is_finite() {
        format!("₹ {:.2}", amount)
    } else {
        "₹ --".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(8791.588723), "₹ 8791.59");
        assert_eq!(format_inr(0.0), "₹ 0.00");
        assert_eq!(format_inr(-12.5), "₹ -12.50");
        assert_eq!(format_inr(f64::NAN), "₹ --");
    }
}
