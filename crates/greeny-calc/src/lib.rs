//! # Greeny Calc
//!
//! Financial calculators behind the Greeny Credit Co-operative Bank website.
//!
//! - **Loans**: equated monthly instalment (EMI) with total interest and total payment
//! - **Deposits**: maturity of fixed, recurring and daily recurring deposits
//! - **Formatting**: rupee amounts the way the website displays them
//!
//! Every calculation is a pure function of its inputs. Nothing here performs
//! I/O or holds state, so calculators can be called from any thread.
//!
//! ## Example
//!
//! ```rust
//! use greeny_calc::prelude::*;
//!
//! let loan = compute_loan_emi(100_000.0, 10.0, 12).unwrap();
//! assert_eq!(format_inr(loan.monthly_payment), "₹ 8791.59");
//!
//! let fd = compute_deposit_maturity(DepositInputs::fixed(10_000.0, 6.0, 12)).unwrap();
//! assert!(fd.maturity_value > fd.total_investment);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod deposit;
pub mod error;
pub mod format;
pub mod loan;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::deposit::{
        compute_deposit_maturity, DepositInputs, DepositKind, DepositResult, Tenure,
    };
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::format::format_inr;
    pub use crate::loan::{compute_loan_emi, LoanInputs, LoanResult};
}

pub use deposit::{compute_deposit_maturity, DepositInputs, DepositKind, DepositResult, Tenure};
pub use error::{CalcError, CalcResult};
pub use format::format_inr;
pub use loan::{compute_loan_emi, LoanInputs, LoanResult};
