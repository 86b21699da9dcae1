//! Folds the flattened query-string encoding (`dormitoriosMin=2`,
//! `superficieTotalOpcion=300-450`, ...) into the same nested `SearchInput`
//! shape the JSON body deserializes to, so both paths share one pipeline.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use crate::models::{FilterField, SearchInput};

/// Builds a `SearchInput` from raw query parameters. A filter group is
/// emitted only when at least one of its `Min`/`Max`/`Opcion` keys carries a
/// non-empty value. Presence is judged on the string itself, so a literal
/// `"0"` is kept as a bound instead of being dropped as falsy.
pub fn from_query(params: &HashMap<String, String>) -> SearchInput {
    let mut filtros = Map::new();

    for field in FilterField::ALL {
        let mut entry = Map::new();
        if let Some(raw) = present(params, &format!("{}Min", field.key())) {
            entry.insert("minimo".to_string(), numeric_value(raw, field.is_count()));
        }
        if let Some(raw) = present(params, &format!("{}Max", field.key())) {
            entry.insert("maximo".to_string(), numeric_value(raw, field.is_count()));
        }
        if let Some(raw) = present(params, &format!("{}Opcion", field.key())) {
            entry.insert("opcion".to_string(), Value::String(raw.to_string()));
        }
        if !entry.is_empty() {
            filtros.insert(field.key().to_string(), Value::Object(entry));
        }
    }

    SearchInput {
        tipo: present(params, "tipo").map(str::to_owned),
        operacion: present(params, "operacion").map(str::to_owned),
        ubicacion: present(params, "ubicacion").map(str::to_owned),
        max_paginas: present(params, "maxPaginas").map(|raw| numeric_value(raw, true)),
        precio_minimo: present(params, "precioMinimo").map(|raw| numeric_value(raw, false)),
        precio_maximo: present(params, "precioMaximo").map(|raw| numeric_value(raw, false)),
        moneda: present(params, "moneda").map(str::to_owned),
        filtros: if filtros.is_empty() { None } else { Some(filtros) },
    }
}

fn present<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Counts parse as integers, areas and prices as floats. A string that fails
/// to parse is passed through untouched; rejecting it is the validators'
/// job, not the normalizer's.
fn numeric_value(raw: &str, integer: bool) -> Value {
    if integer {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(n.into());
        }
    } else if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn folds_min_max_pair_into_filter_entry() {
        let input = from_query(&params(&[
            ("tipo", "Casa"),
            ("dormitoriosMin", "2"),
            ("dormitoriosMax", "4"),
        ]));

        let filtros = input.filtros.expect("filter group should be emitted");
        assert_eq!(filtros["dormitorios"], json!({"minimo": 2, "maximo": 4}));
        assert_eq!(input.tipo.as_deref(), Some("Casa"));
    }

    #[test]
    fn zero_bound_is_kept() {
        let input = from_query(&params(&[("estacionamientosMin", "0")]));

        let filtros = input.filtros.expect("zero is a legitimate bound");
        assert_eq!(filtros["estacionamientos"], json!({"minimo": 0}));
    }

    #[test]
    fn empty_values_do_not_emit_a_group() {
        let input = from_query(&params(&[("banosMin", ""), ("banosOpcion", "  ")]));
        assert!(input.filtros.is_none());
    }

    #[test]
    fn areas_parse_as_floats_and_counts_as_integers() {
        let input = from_query(&params(&[
            ("superficieTotalMin", "120.5"),
            ("dormitoriosMin", "3"),
        ]));

        let filtros = input.filtros.unwrap();
        assert_eq!(filtros["superficieTotal"], json!({"minimo": 120.5}));
        assert_eq!(filtros["dormitorios"], json!({"minimo": 3}));
    }

    #[test]
    fn malformed_numbers_pass_through_as_strings() {
        let input = from_query(&params(&[
            ("dormitoriosMin", "dos"),
            ("precioMinimo", "mucho"),
        ]));

        let filtros = input.filtros.unwrap();
        assert_eq!(filtros["dormitorios"], json!({"minimo": "dos"}));
        assert_eq!(input.precio_minimo, Some(json!("mucho")));
    }

    #[test]
    fn opcion_and_range_may_coexist_in_output() {
        let input = from_query(&params(&[
            ("dormitoriosOpcion", "3"),
            ("dormitoriosMin", "2"),
        ]));

        let filtros = input.filtros.unwrap();
        assert_eq!(filtros["dormitorios"], json!({"minimo": 2, "opcion": "3"}));
    }

    #[test]
    fn scalar_keys_map_straight_across() {
        let input = from_query(&params(&[
            ("operacion", "Arriendo"),
            ("ubicacion", "Providencia"),
            ("maxPaginas", "5"),
            ("precioMaximo", "9500.5"),
            ("moneda", "CLP"),
        ]));

        assert_eq!(input.operacion.as_deref(), Some("Arriendo"));
        assert_eq!(input.ubicacion.as_deref(), Some("Providencia"));
        assert_eq!(input.max_paginas, Some(json!(5)));
        assert_eq!(input.precio_maximo, Some(json!(9500.5)));
        assert_eq!(input.moneda.as_deref(), Some("CLP"));
    }

    #[test]
    fn pure_range_filters_round_trip_through_flattening() {
        let nested = json!({
            "dormitorios": {"minimo": 1, "maximo": 3},
            "superficieUtil": {"minimo": 45.0, "maximo": 90.0},
        });

        // Flatten into the query-string triads, then normalize back.
        let mut flat = HashMap::new();
        for (field, entry) in nested.as_object().unwrap() {
            for (member, suffix) in [("minimo", "Min"), ("maximo", "Max")] {
                if let Some(value) = entry.get(member) {
                    flat.insert(format!("{field}{suffix}"), value.to_string());
                }
            }
        }

        let filtros = from_query(&flat).filtros.unwrap();
        assert_eq!(filtros["dormitorios"], json!({"minimo": 1, "maximo": 3}));
        assert_eq!(
            filtros["superficieUtil"],
            json!({"minimo": 45.0, "maximo": 90.0})
        );
    }
}
