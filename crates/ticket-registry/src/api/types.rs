//! API request and response types.

use crate::error::RegistryError;
use crate::registry::{Registration, Snapshot};
use serde::{Deserialize, Serialize};

/// Query-string addressing (`?cedula=...`).
#[derive(Debug, Deserialize)]
pub struct CedulaQuery {
    pub cedula: Option<String>,
}

impl CedulaQuery {
    /// Extract the identity number, failing if the parameter is absent.
    pub fn require(self) -> Result<String, RegistryError> {
        self.cedula.ok_or_else(|| {
            RegistryError::invalid_field("cedula", "El parámetro 'cedula' es obligatorio")
        })
    }
}

/// Response after storing a new registration.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub mensaje: String,
    pub pendientes: Vec<Registration>,
}

/// Response after updating a registration's email.
#[derive(Debug, Serialize)]
pub struct UpdateEmailResponse {
    pub mensaje: String,
    pub registro: Registration,
}

/// Response after delivering a registration.
#[derive(Debug, Serialize)]
pub struct DeliverResponse {
    pub mensaje: String,
    pub registro: Registration,
    #[serde(flatten)]
    pub listas: Snapshot,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub pendientes: usize,
    pub entregados: usize,
}
