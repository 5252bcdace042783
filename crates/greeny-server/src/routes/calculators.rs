//! Calculator endpoints.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;

use greeny_calc::{DepositInputs, DepositResult, LoanInputs, LoanResult};

use crate::error::{ApiError, ApiResult};

/// Calculator response.
#[derive(Debug, Serialize)]
pub struct CalculationResponse<T> {
    pub success: bool,
    pub result: T,
}

impl<T> CalculationResponse<T> {
    fn ok(result: T) -> Json<Self> {
        Json(Self {
            success: true,
            result,
        })
    }
}

/// Loan EMI.
pub async fn emi(
    body: Result<Json<LoanInputs>, JsonRejection>,
) -> ApiResult<Json<CalculationResponse<LoanResult>>> {
    let Json(inputs) = body.map_err(|r| ApiError::InvalidBody(r.body_text()))?;
    Ok(CalculationResponse::ok(inputs.compute()?))
}

/// Deposit maturity.
pub async fn deposit(
    body: Result<Json<DepositInputs>, JsonRejection>,
) -> ApiResult<Json<CalculationResponse<DepositResult>>> {
    let Json(inputs) = body.map_err(|r| ApiError::InvalidBody(r.body_text()))?;
    Ok(CalculationResponse::ok(inputs.compute()?))
}
