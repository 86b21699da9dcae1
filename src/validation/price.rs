//! Currency-aware validation of the optional price range. Check order:
//! currency code, then each bound's numeric format and domain, then strict
//! min < max ordering.

use serde_json::Value;

use crate::models::{Currency, PriceRange};
use crate::validation::domains::currency_domain;
use crate::validation::{parse_number, ValidationError};

pub fn validate_price_range(
    minimum: Option<&Value>,
    maximum: Option<&Value>,
    currency: Option<&str>,
) -> Result<PriceRange, ValidationError> {
    let currency = match currency {
        None => Currency::default(),
        Some(code) => Currency::from_code(code).ok_or_else(|| {
            ValidationError::on_field(
                format!("moneda must be one of: CLP, CLF, USD (got \"{code}\")"),
                "moneda",
            )
        })?,
    };

    let (low, high) = currency_domain(currency);
    let minimum = bound(minimum, "precioMinimo", currency, low, high)?;
    let maximum = bound(maximum, "precioMaximo", currency, low, high)?;

    if let (Some(min), Some(max)) = (minimum, maximum) {
        if min >= max {
            return Err(ValidationError::on_field(
                format!("precioMinimo ({min}) must be strictly less than precioMaximo ({max})"),
                "precioMinimo",
            ));
        }
    }

    Ok(PriceRange {
        minimum,
        maximum,
        currency,
    })
}

fn bound(
    raw: Option<&Value>,
    param: &str,
    currency: Currency,
    low: f64,
    high: f64,
) -> Result<Option<f64>, ValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    // Format error is currency-agnostic; the domain error cites the currency.
    let value = parse_number(raw)
        .ok_or_else(|| ValidationError::on_field(format!("{param} must be a number"), param))?;

    if value < low || value > high {
        return Err(ValidationError::on_field(
            format!(
                "{param} out of range for {}: must be between {low} and {high}",
                currency.code()
            ),
            param,
        ));
    }

    Ok(Some(value))
}
