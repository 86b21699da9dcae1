use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Currency;

/// Source portal of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Source {
    PortalInmobiliario,
}

/// Core listing data model returned by the search executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub source: Source,
    pub address: String,
    /// Comuna or neighbourhood the listing belongs to
    pub comuna: String,
    pub price: f64,
    pub currency: Currency,
    pub rooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area_sqm: Option<f64>,
    pub url: String,
    pub captured_at: DateTime<Utc>,
    pub raw_data: serde_json::Value,
}
