//! Search handlers. Both paths converge on the same validation pipeline;
//! the GET path only differs by the query-string normalization step.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::models::{Listing, SearchInput};
use crate::server::AppState;
use crate::validation::{self, ValidationError};

/// `POST /search` with a JSON body. The body is taken as raw JSON first so
/// a structurally broken payload still gets the standard failure envelope.
pub async fn search_post(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let input: SearchInput = match serde_json::from_value(body) {
        Ok(input) => input,
        Err(err) => {
            let err = ValidationError::new(format!("invalid request body: {err}"));
            return validation_failure(&SearchInput::default(), &err);
        }
    };
    run_search(state, input).await
}

/// `GET /search` with flattened query parameters
pub async fn search_get(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let input = validation::normalize::from_query(&params);
    run_search(state, input).await
}

async fn run_search(state: AppState, input: SearchInput) -> Response {
    let request = match validation::validate(&input) {
        Ok(request) => request,
        Err(err) => return validation_failure(&input, &err),
    };

    info!(
        location = %request.location,
        pages = request.max_pages,
        "Dispatching validated search"
    );

    match state.executor.execute(&request).await {
        Ok(outcome) => {
            let total = outcome.listings.len();
            let estadisticas = ListingStats::from_listings(&outcome.listings);
            let body = json!({
                "success": true,
                "data": outcome.listings,
                "metadata": {
                    "fuente": outcome.source,
                    "total": total,
                    "paginasRecorridas": outcome.fetched_pages,
                    "parametros": input,
                    "estadisticas": estadisticas,
                },
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            error!(error = %err, "Search executor failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ERROR_INTERNO",
                &err.to_string(),
                None,
                &input,
            )
        }
    }
}

fn validation_failure(input: &SearchInput, err: &ValidationError) -> Response {
    failure(
        StatusCode::BAD_REQUEST,
        "PARAMETROS_INVALIDOS",
        &err.message,
        err.field.as_deref(),
        input,
    )
}

fn failure(
    status: StatusCode,
    codigo: &str,
    message: &str,
    campo: Option<&str>,
    input: &SearchInput,
) -> Response {
    let mut body = json!({
        "success": false,
        "error": message,
        "codigo": codigo,
        "timestamp": Utc::now().to_rfc3339(),
        "parametros": input,
        "ayuda": ayuda(),
    });
    if let (Some(campo), Some(object)) = (campo, body.as_object_mut()) {
        object.insert("campo".to_string(), json!(campo));
    }
    (status, Json(body)).into_response()
}

/// Parameter reference echoed with every failure
fn ayuda() -> Value {
    json!({
        "tipo": "Casa | Departamento",
        "operacion": "Venta | Arriendo",
        "ubicacion": "comuna o ciudad, texto no vacío",
        "maxPaginas": "entero entre 1 y 10 (por defecto 3)",
        "precioMinimo": "número dentro del rango de la moneda",
        "precioMaximo": "número dentro del rango de la moneda",
        "moneda": "CLP | CLF | USD (por defecto CLF)",
        "filtros": {
            "campos": ["dormitorios", "banos", "superficieTotal", "superficieUtil", "estacionamientos"],
            "miembros": ["minimo", "maximo", "opcion"],
        },
    })
}

/// Price summary over the returned listings
#[derive(Debug, Serialize, PartialEq)]
pub struct ListingStats {
    pub total: usize,
    #[serde(rename = "precioMinimo", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(rename = "precioPromedio", skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<f64>,
    #[serde(rename = "precioMaximo", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl ListingStats {
    pub fn from_listings(listings: &[Listing]) -> Self {
        if listings.is_empty() {
            return Self {
                total: 0,
                min_price: None,
                avg_price: None,
                max_price: None,
            };
        }

        let prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
        let sum: f64 = prices.iter().sum();
        Self {
            total: listings.len(),
            min_price: prices.iter().copied().fold(f64::INFINITY, f64::min).into(),
            avg_price: Some(sum / prices.len() as f64),
            max_price: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Source};
    use chrono::Utc;

    fn listing(price: f64) -> Listing {
        Listing {
            id: format!("l{price}"),
            source: Source::PortalInmobiliario,
            address: "Calle Falsa 123".to_string(),
            comuna: "Ñuñoa".to_string(),
            price,
            currency: Currency::Clf,
            rooms: Some(2),
            bathrooms: Some(1),
            area_sqm: Some(60.0),
            url: String::new(),
            captured_at: Utc::now(),
            raw_data: serde_json::Value::Null,
        }
    }

    #[test]
    fn stats_summarize_prices() {
        let stats =
            ListingStats::from_listings(&[listing(4000.0), listing(6000.0), listing(8000.0)]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.min_price, Some(4000.0));
        assert_eq!(stats.avg_price, Some(6000.0));
        assert_eq!(stats.max_price, Some(8000.0));
    }

    #[test]
    fn stats_over_no_listings_are_empty() {
        let stats = ListingStats::from_listings(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.min_price, None);
    }

    #[test]
    fn ayuda_documents_every_filter_field() {
        let ayuda = ayuda();
        let campos = ayuda["filtros"]["campos"].as_array().unwrap();
        assert_eq!(campos.len(), 5);
    }
}
