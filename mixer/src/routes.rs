//! HTTP surface for the mixer (`spec.md` §6).

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use tower_http::trace::TraceLayer;

use csprng_common::auth::{self, AuthKey};
use csprng_common::wire::HealthResponse;
use csprng_common::{ApiError, ApiResult, AUTH_HEADER, MIN_SOURCES};

use crate::pool::{AbsorbError, EntropyPool};

pub struct AppState {
    pub pool: Mutex<EntropyPool>,
    pub auth: AuthKey,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/entropy", post(absorb_entropy))
        .route("/api/v1/seed", get(emit_seed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok())
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let n_sources = state.pool.lock().n_sources();
    if n_sources >= MIN_SOURCES {
        (StatusCode::OK, Json(HealthResponse::ok()))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::seeding(n_sources, MIN_SOURCES)),
        )
    }
}

async fn absorb_entropy(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    auth::require_auth(&state.auth, auth_header(&headers), &body)?;

    let mut pool = state.pool.lock();
    match pool.absorb(&body) {
        Ok(()) => {
            tracing::info!(event = "entropy_mixed", "new entropy mixed into pool");
            Ok((
                StatusCode::OK,
                Json(serde_json::json!({"status": "success", "message": "Entropy mixed."})),
            ))
        }
        Err(AbsorbError::WrongLength(len)) => {
            tracing::warn!(event = "invalid_entropy_size", size = len, "rejected digest");
            Err(ApiError::InvalidInput(
                "entropy must be 32 bytes (256 bits)".to_string(),
            ))
        }
    }
}

/// The seed endpoint's body is binary (`spec.md` §7): on failure it returns
/// a bare status code, never a JSON error envelope.
async fn emit_seed(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(err) = auth::require_auth(&state.auth, auth_header(&headers), b"") {
        return (err.status_code(), Vec::new()).into_response();
    }

    let mut pool = state.pool.lock();
    match pool.emit_seed() {
        Some(seed) => {
            tracing::info!(event = "seed_provided", "seed issued to generator");
            (
                StatusCode::OK,
                [("content-type", "application/octet-stream")],
                seed.to_vec(),
            )
                .into_response()
        }
        None => {
            tracing::warn!(event = "seed_request_too_early", "pool not yet seeded");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}
