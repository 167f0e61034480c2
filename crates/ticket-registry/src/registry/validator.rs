//! Field validation for incoming registration payloads.
//!
//! Checks run in a fixed order and the first failure wins, so a given payload
//! always reports the same error.

use super::{Registration, Registry};
use crate::error::RegistryError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Keys accepted in a registration payload.
pub const ALLOWED_FIELDS: [&str; 5] = ["cedula", "nombre", "correo", "boletos", "zona"];

const EMAIL_UPDATE_FIELDS: [&str; 1] = ["correo"];

static IDENTITY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("identity number pattern"));

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s]+$").expect("name pattern"));

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern"));

/// Validate the shape and field formats of a registration payload.
///
/// Does not look at existing records; see [`validate_new_registration`].
pub fn validate_registration(candidate: &Value) -> Result<Registration, RegistryError> {
    let fields = as_object(candidate)?;
    reject_unknown_fields(fields, &ALLOWED_FIELDS)?;

    let identity_number = required_str(fields, "cedula")?;
    if !IDENTITY_NUMBER.is_match(identity_number) {
        return Err(RegistryError::invalid_field(
            "cedula",
            "La cédula debe contener exactamente 10 dígitos numéricos",
        ));
    }

    let name = required_str(fields, "nombre")?;
    if name.trim().is_empty() || !NAME.is_match(name) {
        return Err(RegistryError::invalid_field(
            "nombre",
            "El nombre solo puede contener letras y espacios",
        ));
    }

    let email = check_email(fields)?;

    let ticket_count = match fields.get("boletos") {
        None | Some(Value::Null) => return Err(missing("boletos")),
        Some(Value::Number(n)) => n.clone(),
        Some(_) => {
            return Err(RegistryError::invalid_field(
                "boletos",
                "El campo 'boletos' debe ser numérico",
            ))
        }
    };

    let zone = required_str(fields, "zona")?;
    if zone.trim().is_empty() {
        return Err(RegistryError::invalid_field(
            "zona",
            "La zona no puede estar vacía",
        ));
    }

    Ok(Registration {
        identity_number: identity_number.to_string(),
        name: name.to_string(),
        email,
        ticket_count,
        zone: zone.to_string(),
    })
}

/// Validate a payload for creation, including identity number uniqueness.
pub fn validate_new_registration(
    candidate: &Value,
    registry: &Registry,
) -> Result<Registration, RegistryError> {
    let record = validate_registration(candidate)?;
    registry.check_available(&record.identity_number)?;
    Ok(record)
}

/// Validate an email update payload (`{"correo": ...}`) and return the new email.
pub fn validate_email_update(candidate: &Value) -> Result<String, RegistryError> {
    let fields = as_object(candidate)?;
    reject_unknown_fields(fields, &EMAIL_UPDATE_FIELDS)?;
    check_email(fields)
}

fn as_object(candidate: &Value) -> Result<&Map<String, Value>, RegistryError> {
    candidate.as_object().ok_or(RegistryError::MalformedInput)
}

fn reject_unknown_fields(
    fields: &Map<String, Value>,
    allowed: &[&str],
) -> Result<(), RegistryError> {
    let unknown: Vec<String> = fields
        .keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(RegistryError::UnknownFields(unknown))
    }
}

fn check_email(fields: &Map<String, Value>) -> Result<String, RegistryError> {
    let email = required_str(fields, "correo")?;
    if !EMAIL.is_match(email) {
        return Err(RegistryError::invalid_field(
            "correo",
            "El correo electrónico no tiene un formato válido",
        ));
    }
    Ok(email.to_string())
}

fn required_str<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, RegistryError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(missing(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(RegistryError::invalid_field(
            field,
            format!("El campo '{}' debe ser texto", field),
        )),
    }
}

fn missing(field: &'static str) -> RegistryError {
    RegistryError::invalid_field(field, format!("El campo '{}' es obligatorio", field))
}
