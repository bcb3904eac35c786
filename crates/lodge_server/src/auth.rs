//! Service-key guard for admin routes.

use crate::{ApiError, AppState};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use lodge_error::{LodgeError, ServerError, ServerErrorKind};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

/// Environment variable holding the service key.
pub const SERVICE_KEY_VAR: &str = "LODGE_SERVICE_KEY";

/// Read the service key from the environment.
///
/// An unset or blank variable yields `None`.
pub fn service_key_from_env() -> Option<Arc<str>> {
    std::env::var(SERVICE_KEY_VAR)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .map(Arc::from)
}

/// Compare a presented token with the service key in constant time.
///
/// Both sides are hashed first so the comparison length does not depend on
/// either input.
fn keys_match(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented.ct_eq(&expected).into()
}

fn unauthorized(reason: &str) -> ApiError {
    ApiError(LodgeError::from(ServerError::new(
        ServerErrorKind::Unauthorized(reason.to_string()),
    )))
}

/// Reject requests whose bearer token does not match the service key.
///
/// Without a configured key every admin request is rejected.
pub async fn require_service_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.service_key.as_deref() else {
        warn!(path = %request.uri().path(), "Admin request without a configured service key");
        return Err(unauthorized("service key not configured"));
    };

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(token) if keys_match(token, expected) => Ok(next.run(request).await),
        Some(_) => Err(unauthorized("service key mismatch")),
        None => Err(unauthorized("missing bearer token")),
    }
}
