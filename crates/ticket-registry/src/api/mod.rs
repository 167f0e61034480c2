//! HTTP API for the ticket registry.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::registry::Registry;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Pending and delivered registrations. Every read-modify-write holds
    /// the write guard for its whole duration.
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}

/// Create the API router without rate limiting.
pub fn create_router(state: AppState) -> Router {
    with_logging(routes()).with_state(state)
}

/// Create the API router with a global rate limit.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    let limited = routes().layer(axum_middleware::from_fn_with_state(
        rate_limit,
        rate_limit_middleware,
    ));

    with_logging(limited).with_state(state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", only(get(handlers::health)))
        .route("/guardar-json", only(post(handlers::create_registration)))
        // Lookup, update and delivery accept both /{cedula} and ?cedula=
        .route(
            "/buscar-registro",
            only(get(handlers::find_registration_by_query)),
        )
        .route(
            "/buscar-registro/:cedula",
            only(get(handlers::find_registration)),
        )
        .route(
            "/actualizar-correo",
            only(put(handlers::update_email_by_query)),
        )
        .route(
            "/actualizar-correo/:cedula",
            only(put(handlers::update_email)),
        )
        .route(
            "/eliminar-json",
            only(delete(handlers::deliver_registration_by_query)),
        )
        .route(
            "/eliminar-json/:cedula",
            only(delete(handlers::deliver_registration)),
        )
        .route("/listado", only(get(handlers::list_registrations)))
        .fallback(handlers::route_not_found)
}

fn with_logging(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Answer unsupported methods on a known path with the route-not-found error
/// instead of 405.
fn only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handlers::route_not_found)
}
