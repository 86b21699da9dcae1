//! Static domain tables: per-currency price bounds, per-field numeric
//! bounds, and per-field enumerated option sets. Lookups are exhaustive
//! matches over the fixed enums, so an unknown key cannot exist here.

use crate::models::{Currency, FilterField};

/// Inclusive `[low, high]` bound pair
pub type Domain = (f64, f64);

pub const PROPERTY_TYPES: [&str; 2] = ["Casa", "Departamento"];
pub const OPERATIONS: [&str; 2] = ["Venta", "Arriendo"];

/// Realistic price magnitudes per currency unit. CLP prices run in the
/// millions, CLF (UF) in the tens to thousands, USD in between.
pub fn currency_domain(currency: Currency) -> Domain {
    match currency {
        Currency::Clp => (100_000.0, 50_000_000_000.0),
        Currency::Clf => (50.0, 500_000.0),
        Currency::Usd => (100.0, 50_000_000.0),
    }
}

pub fn field_domain(field: FilterField) -> Domain {
    match field {
        FilterField::Dormitorios | FilterField::Banos | FilterField::Estacionamientos => {
            (0.0, 10.0)
        }
        FilterField::SuperficieTotal | FilterField::SuperficieUtil => (0.0, 10_000.0),
    }
}

/// Pre-bucketed area labels as the portal renders them
const AREA_BUCKETS: &[&str] = &[
    "0-50", "50-100", "100-200", "200-300", "300-450", "450-600", "600+",
];

pub fn field_options(field: FilterField) -> &'static [&'static str] {
    match field {
        FilterField::Dormitorios => &["0", "1", "2", "3", "4", "5", "6+"],
        FilterField::Banos => &["1", "2", "3", "4", "5+"],
        FilterField::SuperficieTotal | FilterField::SuperficieUtil => AREA_BUCKETS,
        FilterField::Estacionamientos => &["0", "1", "2", "3+"],
    }
}
