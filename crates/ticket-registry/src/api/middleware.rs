//! Rate limiting and request logging middleware.

use crate::config::RateLimitConfig;
use crate::error::RegistryError;
use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc};
use tracing::{debug, warn};

/// Global rate limiter (not keyed by IP).
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    pub global: Arc<GlobalLimiter>,
}

impl RateLimitState {
    /// Create a rate limiter allowing `requests_per_minute` requests.
    pub fn new(requests_per_minute: NonZeroU32) -> Self {
        Self {
            global: Arc::new(RateLimiter::direct(Quota::per_minute(requests_per_minute))),
        }
    }

    /// Build the limiter from configuration, or `None` when limiting is off.
    pub fn from_config(config: &RateLimitConfig) -> Option<Self> {
        config
            .per_minute
            .and_then(NonZeroU32::new)
            .map(Self::new)
    }
}

/// Rejects requests with 429 once the global quota is exhausted.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, RegistryError> {
    if rate_limit.global.check().is_err() {
        warn!("Global rate limit exceeded");
        return Err(RegistryError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

/// Logs each request with its status, duration and addressed cedula.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let cedula = addressed_cedula(&uri).unwrap_or_default();
    let start = std::time::Instant::now();

    debug!(%method, %uri, %cedula, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %cedula, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %cedula, %status, ?duration, "Request failed");
    }

    response
}

/// The cedula a request targets, from `/<route>/<cedula>` or `?cedula=`.
fn addressed_cedula(uri: &Uri) -> Option<String> {
    let from_path = uri
        .path()
        .trim_start_matches('/')
        .split_once('/')
        .map(|(_, rest)| rest)
        .filter(|rest| !rest.is_empty());

    if let Some(cedula) = from_path {
        return Some(cedula.to_string());
    }

    uri.query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("cedula="))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_exhaustion() {
        let state = RateLimitState::new(NonZeroU32::MIN);

        assert!(state.global.check().is_ok());
        assert!(state.global.check().is_err());
    }

    #[test]
    fn test_rate_limit_disabled_by_default() {
        assert!(RateLimitState::from_config(&RateLimitConfig::default()).is_none());
        assert!(RateLimitState::from_config(&RateLimitConfig {
            per_minute: Some(0)
        })
        .is_none());
        assert!(RateLimitState::from_config(&RateLimitConfig {
            per_minute: Some(30)
        })
        .is_some());
    }

    #[test]
    fn test_addressed_cedula() {
        let cedula = |uri: &str| addressed_cedula(&uri.parse().unwrap());

        assert_eq!(
            cedula("/buscar-registro/1234567890").as_deref(),
            Some("1234567890")
        );
        assert_eq!(
            cedula("/eliminar-json?cedula=1234567890").as_deref(),
            Some("1234567890")
        );
        assert_eq!(cedula("/listado"), None);
        assert_eq!(cedula("/guardar-json"), None);
    }
}
