// Loan payment calculation for the finance calculator

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub price: f64,
    #[serde(default)]
    pub down_payment: f64,
    pub annual_rate: f64, // percent, e.g. 4.9
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub financed_amount: f64,
    pub monthly_payment: f64,
    pub total_payable: f64,
    pub total_interest: f64,
}

// Standard annuity formula: M = P*r / (1 - (1 + r)^-n)
pub fn monthly_payment(principal: f64, annual_rate: f64, term_months: u32) -> Result<f64, EngineError> {
    if term_months == 0 {
        return Err(EngineError::InvalidLoanTerm);
    }
    check_amount("principal", principal)?;
    check_amount("annual_rate", annual_rate)?;

    let n = f64::from(term_months);
    let r = annual_rate / 12.0 / 100.0;
    if r == 0.0 {
        return Ok(principal / n);
    }
    Ok(principal * r / (1.0 - (1.0 + r).powf(-n)))
}

pub fn quote(request: &QuoteRequest) -> Result<Quote, EngineError> {
    check_amount("price", request.price)?;
    check_amount("down_payment", request.down_payment)?;

    // A down payment above the price leaves nothing to finance
    let financed = (request.price - request.down_payment).max(0.0);
    let monthly = monthly_payment(financed, request.annual_rate, request.term_months)?;
    let total_payable = monthly * f64::from(request.term_months);

    Ok(Quote {
        financed_amount: round_cents(financed),
        monthly_payment: round_cents(monthly),
        total_payable: round_cents(total_payable),
        total_interest: round_cents(total_payable - financed),
    })
}

fn check_amount(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidAmount { field, value })
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
