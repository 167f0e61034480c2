//! Error types for the ticket registry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Registry error types.
///
/// Every variant is local to a single request; none of them is fatal to the
/// process.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("El dato enviado no es un JSON válido")]
    MalformedInput,

    #[error("El JSON contiene campos no permitidos: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("{message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("Ya existe un registro con la cédula {0}")]
    AlreadyRegistered(String),

    #[error("La cédula {0} ya fue entregada y no puede registrarse de nuevo")]
    AlreadyDelivered(String),

    #[error("Registro no encontrado")]
    NotFound(String),

    #[error("Ruta no encontrada")]
    RouteNotFound,

    #[error("Límite de solicitudes excedido")]
    RateLimitExceeded,
}

impl RegistryError {
    pub(crate) fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        RegistryError::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Machine-readable error code exposed to API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::MalformedInput => "MALFORMED_INPUT",
            RegistryError::UnknownFields(_) => "UNKNOWN_FIELDS",
            RegistryError::InvalidField { .. } => "INVALID_FIELD",
            RegistryError::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            RegistryError::AlreadyDelivered(_) => "ALREADY_DELIVERED",
            RegistryError::NotFound(_) => "NOT_FOUND",
            RegistryError::RouteNotFound => "ROUTE_NOT_FOUND",
            RegistryError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RegistryError::MalformedInput
            | RegistryError::UnknownFields(_)
            | RegistryError::InvalidField { .. }
            | RegistryError::AlreadyRegistered(_)
            | RegistryError::AlreadyDelivered(_) => StatusCode::BAD_REQUEST,
            RegistryError::NotFound(_) | RegistryError::RouteNotFound => StatusCode::NOT_FOUND,
            RegistryError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn detail(&self) -> Option<Value> {
        match self {
            RegistryError::UnknownFields(keys) => Some(Value::from(keys.clone())),
            RegistryError::InvalidField { field, .. } => Some(Value::from(*field)),
            RegistryError::AlreadyRegistered(cedula)
            | RegistryError::AlreadyDelivered(cedula)
            | RegistryError::NotFound(cedula) => Some(Value::from(cedula.as_str())),
            _ => None,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub mensaje: String,
    pub codigo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalle: Option<Value>,
}

impl From<&RegistryError> for ErrorResponse {
    fn from(e: &RegistryError) -> Self {
        Self {
            mensaje: e.to_string(),
            codigo: e.code().to_string(),
            detalle: e.detail(),
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RegistryError::MalformedInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RegistryError::AlreadyDelivered("1234567890".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RegistryError::NotFound("1234567890".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(RegistryError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            RegistryError::RateLimitExceeded.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_unknown_fields_body_lists_keys() {
        let err = RegistryError::UnknownFields(vec!["edad".into(), "telefono".into()]);
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["codigo"], "UNKNOWN_FIELDS");
        assert_eq!(body["detalle"], serde_json::json!(["edad", "telefono"]));
        assert!(body["mensaje"].as_str().unwrap().contains("edad, telefono"));
    }

    #[test]
    fn test_route_not_found_has_no_detail() {
        let body = serde_json::to_value(ErrorResponse::from(&RegistryError::RouteNotFound)).unwrap();

        assert_eq!(body["mensaje"], "Ruta no encontrada");
        assert!(body.get("detalle").is_none());
    }
}
