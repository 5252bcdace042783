//! Error types for the calculators.

use thiserror::Error;

/// A specialized Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// An argument is outside the domain of the formula.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending argument.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl CalcError {
    /// Creates an invalid input error.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the argument that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, "must be a finite number"))
    }
}

/// Rejects values that are not finite or not strictly positive.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> CalcResult<f64> {
    let value = ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(
            field,
            format!("must be greater than zero, got {value}"),
        ))
    }
}

/// Rejects values that are not finite or negative.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    let value = ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(
            field,
            format!("cannot be negative, got {value}"),
        ))
    }
}

/// Rejects a computed amount that overflowed.
pub(crate) fn ensure_representable(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(
            field,
            "gives a result too large to represent",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::invalid_input("principal", "must be greater than zero, got 0");
        assert_eq!(
            err.to_string(),
            "invalid input for principal: must be greater than zero, got 0"
        );
        assert_eq!(err.field(), "principal");
    }

    #[test]
    fn test_guards() {
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", -1.0).is_err());
        assert_eq!(ensure_positive("x", 2.5), Ok(2.5));
        assert!(ensure_non_negative("x", -0.01).is_err());
        assert_eq!(ensure_non_negative("x", 0.0), Ok(0.0));
    }
}
