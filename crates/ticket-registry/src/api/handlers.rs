//! HTTP request handlers.

use super::types::{
    CedulaQuery, CreateResponse, DeliverResponse, HealthResponse, UpdateEmailResponse,
};
use super::AppState;
use crate::error::RegistryError;
use crate::registry::{validate_email_update, validate_new_registration, Registration, Snapshot};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, Uri},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.registry.read().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        pendientes: registry.count_pending(),
        entregados: registry.count_delivered(),
    })
}

/// Validate and store a new registration.
pub async fn create_registration(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreateResponse>, RegistryError> {
    let candidate = json_body(payload)?;

    // Uniqueness check and insert happen under the same guard
    let mut registry = state.registry.write().await;
    let record = validate_new_registration(&candidate, &registry).map_err(rejected)?;
    let cedula = record.identity_number.clone();
    let pendientes = registry.create(record)?.to_vec();

    info!(cedula = %cedula, pending = pendientes.len(), "Registration stored");

    Ok(Json(CreateResponse {
        mensaje: "JSON guardado exitosamente".to_string(),
        pendientes,
    }))
}

/// Look up a pending registration by path parameter.
pub async fn find_registration(
    State(state): State<AppState>,
    cedula: Result<Path<String>, PathRejection>,
) -> Result<Json<Registration>, RegistryError> {
    let cedula = path_cedula(cedula)?;
    find(&state, &cedula).await
}

/// Look up a pending registration by `?cedula=`.
pub async fn find_registration_by_query(
    State(state): State<AppState>,
    query: Result<Query<CedulaQuery>, QueryRejection>,
) -> Result<Json<Registration>, RegistryError> {
    let cedula = query_cedula(query)?;
    find(&state, &cedula).await
}

/// Update the email of a pending registration by path parameter.
pub async fn update_email(
    State(state): State<AppState>,
    cedula: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateEmailResponse>, RegistryError> {
    let cedula = path_cedula(cedula)?;
    apply_email_update(&state, cedula, payload).await
}

/// Update the email of a pending registration by `?cedula=`.
pub async fn update_email_by_query(
    State(state): State<AppState>,
    query: Result<Query<CedulaQuery>, QueryRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateEmailResponse>, RegistryError> {
    let cedula = query_cedula(query)?;
    apply_email_update(&state, cedula, payload).await
}

/// Move a pending registration to the delivered list by path parameter.
pub async fn deliver_registration(
    State(state): State<AppState>,
    cedula: Result<Path<String>, PathRejection>,
) -> Result<Json<DeliverResponse>, RegistryError> {
    let cedula = path_cedula(cedula)?;
    deliver(&state, &cedula).await
}

/// Move a pending registration to the delivered list by `?cedula=`.
pub async fn deliver_registration_by_query(
    State(state): State<AppState>,
    query: Result<Query<CedulaQuery>, QueryRejection>,
) -> Result<Json<DeliverResponse>, RegistryError> {
    let cedula = query_cedula(query)?;
    deliver(&state, &cedula).await
}

/// List pending and delivered registrations.
pub async fn list_registrations(State(state): State<AppState>) -> Json<Snapshot> {
    let registry = state.registry.read().await;
    Json(registry.list_all())
}

/// Fallback for unknown paths and unsupported methods.
pub async fn route_not_found(method: Method, uri: Uri) -> RegistryError {
    debug!(%method, %uri, "No route matched");
    RegistryError::RouteNotFound
}

async fn find(state: &AppState, cedula: &str) -> Result<Json<Registration>, RegistryError> {
    let registry = state.registry.read().await;
    let record = registry
        .find_pending(cedula)
        .ok_or_else(|| RegistryError::NotFound(cedula.to_string()))?;

    Ok(Json(record.clone()))
}

async fn apply_email_update(
    state: &AppState,
    cedula: String,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateEmailResponse>, RegistryError> {
    let candidate = json_body(payload)?;
    let email = validate_email_update(&candidate).map_err(rejected)?;

    let mut registry = state.registry.write().await;
    let registro = registry.update_email(&cedula, email)?.clone();

    info!(cedula = %cedula, "Email updated");

    Ok(Json(UpdateEmailResponse {
        mensaje: "Correo actualizado con éxito".to_string(),
        registro,
    }))
}

async fn deliver(state: &AppState, cedula: &str) -> Result<Json<DeliverResponse>, RegistryError> {
    let mut registry = state.registry.write().await;
    let registro = registry.deliver(cedula)?;
    let listas = registry.list_all();

    info!(
        cedula = %cedula,
        pending = listas.pending.len(),
        delivered = listas.delivered.len(),
        "Registration delivered"
    );

    Ok(Json(DeliverResponse {
        mensaje: "Registro entregado".to_string(),
        registro,
        listas,
    }))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, RegistryError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!(%rejection, "Request body is not valid JSON");
            Err(RegistryError::MalformedInput)
        }
    }
}

fn path_cedula(cedula: Result<Path<String>, PathRejection>) -> Result<String, RegistryError> {
    match cedula {
        Ok(Path(cedula)) => Ok(cedula),
        Err(rejection) => {
            warn!(%rejection, "Invalid cedula path parameter");
            Err(invalid_cedula_parameter())
        }
    }
}

fn query_cedula(
    query: Result<Query<CedulaQuery>, QueryRejection>,
) -> Result<String, RegistryError> {
    match query {
        Ok(Query(query)) => query.require(),
        Err(rejection) => {
            warn!(%rejection, "Invalid cedula query parameter");
            Err(invalid_cedula_parameter())
        }
    }
}

fn invalid_cedula_parameter() -> RegistryError {
    RegistryError::invalid_field("cedula", "El parámetro 'cedula' no es válido")
}

fn rejected(error: RegistryError) -> RegistryError {
    warn!(code = error.code(), %error, "Payload rejected");
    error
}
