//! Registration records, the in-memory registry and the record validator.

mod memory;
mod validator;

pub use memory::Registry;
pub use validator::{
    validate_email_update, validate_new_registration, validate_registration, ALLOWED_FIELDS,
};

use serde::Serialize;
use serde_json::Number;

/// A validated registration record.
///
/// Serialized with the field names API consumers send and receive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    /// 10-digit identity number (cédula), unique across the registry
    #[serde(rename = "cedula")]
    pub identity_number: String,

    /// Registrant name, letters and spaces only
    #[serde(rename = "nombre")]
    pub name: String,

    /// Contact email
    #[serde(rename = "correo")]
    pub email: String,

    /// Number of tickets, kept as the exact JSON number received
    #[serde(rename = "boletos")]
    pub ticket_count: Number,

    /// Seating zone
    #[serde(rename = "zona")]
    pub zone: String,
}

/// Point-in-time copy of both registry lists, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(rename = "pendientes")]
    pub pending: Vec<Registration>,
    #[serde(rename = "entregados")]
    pub delivered: Vec<Registration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registration_wire_names() {
        let record = Registration {
            identity_number: "1234567890".into(),
            name: "Ana Paz".into(),
            email: "ana@x.com".into(),
            ticket_count: Number::from(2),
            zone: "A".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "cedula": "1234567890",
                "nombre": "Ana Paz",
                "correo": "ana@x.com",
                "boletos": 2,
                "zona": "A"
            })
        );
    }

    #[test]
    fn test_snapshot_wire_names() {
        let value = serde_json::to_value(Snapshot::default()).unwrap();
        assert_eq!(value, json!({ "pendientes": [], "entregados": [] }));
    }
}
