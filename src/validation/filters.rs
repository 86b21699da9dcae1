//! Per-field structural and domain validation of the advanced filters map.
//! Each entry may carry a numeric range, an enumerated option, or both; the
//! two encodings are validated independently.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::models::{FilterConstraint, FilterField};
use crate::validation::domains::{field_domain, field_options};
use crate::validation::{parse_number, ValidationError};

pub fn validate_filters(
    raw: &Map<String, Value>,
) -> Result<BTreeMap<FilterField, FilterConstraint>, ValidationError> {
    let mut filters = BTreeMap::new();

    for (key, value) in raw {
        let field = FilterField::from_key(key).ok_or_else(|| {
            let valid = FilterField::ALL.map(FilterField::key).join(", ");
            ValidationError::on_field(
                format!("unknown filter \"{key}\"; valid filters are: {valid}"),
                key.clone(),
            )
        })?;

        let entry = value.as_object().ok_or_else(|| {
            ValidationError::on_field(
                format!("filter \"{}\" must be an object", field.key()),
                field.key(),
            )
        })?;

        let minimum = entry.get("minimo");
        let maximum = entry.get("maximo");
        let option = entry.get("opcion");
        if minimum.is_none() && maximum.is_none() && option.is_none() {
            return Err(ValidationError::on_field(
                format!(
                    "filter \"{}\" must provide at least one of: minimo, maximo, opcion",
                    field.key()
                ),
                field.key(),
            ));
        }

        let minimum = bound(field, "minimo", minimum)?;
        let maximum = bound(field, "maximo", maximum)?;
        if let (Some(min), Some(max)) = (minimum, maximum) {
            if min > max {
                return Err(ValidationError::on_field(
                    format!(
                        "{}: minimo ({min}) must be less than or equal to maximo ({max})",
                        field.key()
                    ),
                    field.key(),
                ));
            }
        }

        let option = match option {
            None => None,
            Some(value) => Some(validated_option(field, value)?),
        };

        filters.insert(
            field,
            FilterConstraint {
                minimum,
                maximum,
                option,
            },
        );
    }

    Ok(filters)
}

fn bound(
    field: FilterField,
    member: &str,
    raw: Option<&Value>,
) -> Result<Option<f64>, ValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let value = parse_number(raw).ok_or_else(|| {
        ValidationError::on_field(
            format!("{}.{member} must be a number", field.key()),
            field.key(),
        )
    })?;

    let (low, high) = field_domain(field);
    if value < low || value > high {
        return Err(ValidationError::on_field(
            format!(
                "{}.{member} must be between {low} and {high}",
                field.key()
            ),
            field.key(),
        ));
    }

    Ok(Some(value))
}

/// Options are string-compared against the field's fixed set. A bare number
/// in the JSON body is compared through its decimal rendering.
fn validated_option(field: FilterField, raw: &Value) -> Result<String, ValidationError> {
    let text = match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let permitted = field_options(field);
    if !permitted.contains(&text.as_str()) {
        return Err(ValidationError::on_field(
            format!(
                "{}: \"{text}\" is not a valid opcion; permitted values: {}",
                field.key(),
                permitted.join(", ")
            ),
            field.key(),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().expect("fixture must be an object").clone()
    }

    #[test]
    fn accepts_range_within_domain() {
        let filters =
            validate_filters(&raw(json!({"dormitorios": {"minimo": 4, "maximo": 5}}))).unwrap();
        assert_eq!(
            filters[&FilterField::Dormitorios],
            FilterConstraint {
                minimum: Some(4.0),
                maximum: Some(5.0),
                option: None,
            }
        );
    }

    #[test]
    fn unknown_field_lists_the_valid_set() {
        let err = validate_filters(&raw(json!({"piscinas": {"minimo": 1}}))).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("piscinas"));
        for field in FilterField::ALL {
            assert!(err.message.contains(field.key()));
        }
    }

    #[test]
    fn bare_scalar_entry_is_rejected() {
        let err = validate_filters(&raw(json!({"dormitorios": 3}))).unwrap_err();
        assert!(err.message.contains("must be an object"));
    }

    #[test]
    fn empty_entry_lists_the_permitted_members() {
        let err = validate_filters(&raw(json!({"banos": {}}))).unwrap_err();
        assert!(err.message.contains("minimo"));
        assert!(err.message.contains("maximo"));
        assert!(err.message.contains("opcion"));
    }

    #[test]
    fn bound_outside_field_domain_is_rejected() {
        let err = validate_filters(&raw(json!({"dormitorios": {"maximo": 25}}))).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("dormitorios"));
        assert!(err.message.contains("between 0 and 10"));
    }

    #[test]
    fn non_numeric_bound_is_rejected() {
        let err =
            validate_filters(&raw(json!({"superficieTotal": {"minimo": "grande"}}))).unwrap_err();
        assert!(err.message.contains("superficieTotal.minimo"));
        assert!(err.message.contains("must be a number"));
    }

    #[test]
    fn inverted_range_fails_regardless_of_domain_membership() {
        let err =
            validate_filters(&raw(json!({"banos": {"minimo": 4, "maximo": 2}}))).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("banos"));
        assert!(err.message.contains('4'));
        assert!(err.message.contains('2'));
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let filters =
            validate_filters(&raw(json!({"banos": {"minimo": 2, "maximo": 2}}))).unwrap();
        assert_eq!(filters[&FilterField::Banos].minimum, Some(2.0));
    }

    #[test]
    fn option_must_belong_to_the_field_set() {
        let err = validate_filters(&raw(json!({"dormitorios": {"opcion": "7"}}))).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("dormitorios"));
        assert!(err.message.contains("6+"));
    }

    #[test]
    fn valid_option_is_carried_through() {
        let filters =
            validate_filters(&raw(json!({"superficieTotal": {"opcion": "300-450"}}))).unwrap();
        assert_eq!(
            filters[&FilterField::SuperficieTotal].option.as_deref(),
            Some("300-450")
        );
    }

    #[test]
    fn option_and_range_may_coexist() {
        let filters = validate_filters(&raw(
            json!({"dormitorios": {"minimo": 2, "maximo": 4, "opcion": "3"}}),
        ))
        .unwrap();

        let constraint = &filters[&FilterField::Dormitorios];
        assert_eq!(constraint.minimum, Some(2.0));
        assert_eq!(constraint.maximum, Some(4.0));
        assert_eq!(constraint.option.as_deref(), Some("3"));
    }

    #[test]
    fn numeric_option_compares_through_its_rendering() {
        let filters = validate_filters(&raw(json!({"dormitorios": {"opcion": 3}}))).unwrap();
        assert_eq!(
            filters[&FilterField::Dormitorios].option.as_deref(),
            Some("3")
        );
    }

    #[test]
    fn string_encoded_bounds_are_accepted() {
        let filters =
            validate_filters(&raw(json!({"estacionamientos": {"minimo": "1"}}))).unwrap();
        assert_eq!(filters[&FilterField::Estacionamientos].minimum, Some(1.0));
    }
}
