//! Checks the three mandatory search dimensions: property type, operation
//! and location. Presence is verified before enum membership.

use crate::models::{Operation, PropertyType, SearchInput};
use crate::validation::domains::{OPERATIONS, PROPERTY_TYPES};
use crate::validation::ValidationError;

/// The mandatory dimensions of every search, extracted and typed
#[derive(Debug, Clone, PartialEq)]
pub struct BasicParams {
    pub property_type: PropertyType,
    pub operation: Operation,
    pub location: String,
}

pub fn validate_basic(input: &SearchInput) -> Result<BasicParams, ValidationError> {
    let tipo = required(input.tipo.as_deref());
    let operacion = required(input.operacion.as_deref());
    let ubicacion = required(input.ubicacion.as_deref());

    // One combined message when anything is missing, naming all three.
    let (Some(tipo), Some(operacion), Some(ubicacion)) = (tipo, operacion, ubicacion) else {
        return Err(ValidationError::new(
            "tipo, operacion and ubicacion are required parameters",
        ));
    };

    let property_type = PropertyType::from_param(tipo).ok_or_else(|| {
        ValidationError::on_field(
            format!(
                "tipo must be one of: {} (got \"{tipo}\")",
                PROPERTY_TYPES.join(", ")
            ),
            "tipo",
        )
    })?;

    let operation = Operation::from_param(operacion).ok_or_else(|| {
        ValidationError::on_field(
            format!(
                "operacion must be one of: {} (got \"{operacion}\")",
                OPERATIONS.join(", ")
            ),
            "operacion",
        )
    })?;

    Ok(BasicParams {
        property_type,
        operation,
        location: ubicacion.to_string(),
    })
}

fn required(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
