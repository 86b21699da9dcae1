//! Filter normalization and validation engine. Turns weakly-typed inbound
//! input (JSON body or flattened query string) into a canonical, fully
//! validated [`SearchRequest`], failing fast with a field-attributed
//! [`ValidationError`] on the first violation.

pub mod basic;
pub mod domains;
mod error;
pub mod filters;
pub mod normalize;
pub mod price;

pub use error::ValidationError;

use serde_json::Value;

use crate::models::{SearchInput, SearchRequest};
use basic::BasicParams;

const DEFAULT_MAX_PAGES: u32 = 3;

/// Runs the full pipeline: basic parameters, then the price range (only when
/// a price field was supplied), then the advanced filters (only when the map
/// is non-empty). The first failure aborts; no partial request is produced.
pub fn validate(input: &SearchInput) -> Result<SearchRequest, ValidationError> {
    let BasicParams {
        property_type,
        operation,
        location,
    } = basic::validate_basic(input)?;

    let price_supplied =
        input.precio_minimo.is_some() || input.precio_maximo.is_some() || input.moneda.is_some();
    let price_range = if price_supplied {
        let range = price::validate_price_range(
            input.precio_minimo.as_ref(),
            input.precio_maximo.as_ref(),
            input.moneda.as_deref(),
        )?;
        // A currency alone constrains nothing.
        (range.minimum.is_some() || range.maximum.is_some()).then_some(range)
    } else {
        None
    };

    let filters = match input.filtros.as_ref() {
        Some(raw) if !raw.is_empty() => Some(filters::validate_filters(raw)?),
        _ => None,
    };

    Ok(SearchRequest {
        property_type,
        operation,
        location,
        max_pages: max_pages(input.max_paginas.as_ref()),
        price_range,
        filters,
    })
}

/// Clamped into [1, 10]; anything unusable falls back to the default of 3
/// rather than failing. One of the two documented lenient defaults.
fn max_pages(raw: Option<&Value>) -> u32 {
    raw.and_then(parse_number)
        .map(|n| (n as i64).clamp(1, 10) as u32)
        .unwrap_or(DEFAULT_MAX_PAGES)
}

/// Lenient numeric read shared by the validators: JSON numbers pass through,
/// strings are parsed, everything else is non-numeric.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse().ok()
            }
        }
        _ => None,
    }
}
