use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property categories recognized by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Casa,
    Departamento,
}

impl PropertyType {
    /// Exact wire value, as the API documents it
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "Casa" => Some(Self::Casa),
            "Departamento" => Some(Self::Departamento),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Casa => "Casa",
            Self::Departamento => "Departamento",
        }
    }
}

/// Sale or rental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Venta,
    Arriendo,
}

impl Operation {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "Venta" => Some(Self::Venta),
            "Arriendo" => Some(Self::Arriendo),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Venta => "Venta",
            Self::Arriendo => "Arriendo",
        }
    }
}

/// Price currencies accepted by the API. CLF (unidad de fomento) is the
/// customary unit for Chilean property sales and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "CLP")]
    Clp,
    #[default]
    #[serde(rename = "CLF")]
    Clf,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "CLP" => Some(Self::Clp),
            "CLF" => Some(Self::Clf),
            "USD" => Some(Self::Usd),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Clp => "CLP",
            Self::Clf => "CLF",
            Self::Usd => "USD",
        }
    }
}

/// The five advanced search attributes the portal understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Dormitorios,
    Banos,
    SuperficieTotal,
    SuperficieUtil,
    Estacionamientos,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        Self::Dormitorios,
        Self::Banos,
        Self::SuperficieTotal,
        Self::SuperficieUtil,
        Self::Estacionamientos,
    ];

    /// Wire key, also the prefix of the flattened query-string triad
    /// (`dormitoriosMin`, `dormitoriosMax`, `dormitoriosOpcion`)
    pub fn key(self) -> &'static str {
        match self {
            Self::Dormitorios => "dormitorios",
            Self::Banos => "banos",
            Self::SuperficieTotal => "superficieTotal",
            Self::SuperficieUtil => "superficieUtil",
            Self::Estacionamientos => "estacionamientos",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Room-style fields carry whole counts; areas carry square meters
    pub fn is_count(self) -> bool {
        matches!(self, Self::Dormitorios | Self::Banos | Self::Estacionamientos)
    }
}

/// Validated constraint for one filter field. A range and an enumerated
/// option may coexist; the executor applies both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterConstraint {
    #[serde(rename = "minimo", skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(rename = "maximo", skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(rename = "opcion", skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

/// Validated price constraint. When both bounds are present the validator
/// has already guaranteed `minimum < maximum`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRange {
    #[serde(rename = "minimo", skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(rename = "maximo", skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(rename = "moneda")]
    pub currency: Currency,
}

/// Raw, weakly-typed search input as received from either the JSON body or
/// the flattened query string. Numeric fields stay `serde_json::Value` so a
/// string-encoded number survives deserialization and is judged by the
/// validators rather than by serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<String>,
    #[serde(rename = "maxPaginas", skip_serializing_if = "Option::is_none")]
    pub max_paginas: Option<Value>,
    #[serde(rename = "precioMinimo", skip_serializing_if = "Option::is_none")]
    pub precio_minimo: Option<Value>,
    #[serde(rename = "precioMaximo", skip_serializing_if = "Option::is_none")]
    pub precio_maximo: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moneda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtros: Option<Map<String, Value>>,
}

/// Canonical, fully validated search description. Built fresh per inbound
/// call and never mutated afterwards; the only thing the search executor
/// ever sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub property_type: PropertyType,
    pub operation: Operation,
    pub location: String,
    pub max_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<FilterField, FilterConstraint>>,
}
