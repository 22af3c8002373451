//! HTTP surface for the generator (`spec.md` §6).

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream;
use tower_http::trace::TraceLayer;

use csprng_common::auth::{self, AuthKey};
use csprng_common::wire::{
    DrawNumbersRequest, DrawNumbersResponse, DrawSymbolsRequest, DrawSymbolsResponse,
    HealthResponse, SlotResponse,
};
use csprng_common::{ApiError, ApiResult, AUTH_HEADER, STREAM_CHUNK};

use crate::generator::Generator;
use crate::sampling;

pub struct AppState {
    pub generator: Arc<Generator>,
    pub auth: AuthKey,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/games/slot_5x3", get(slot_5x3))
        .route("/api/v1/rng/draw_numbers", post(draw_numbers))
        .route("/api/v1/games/draw_symbols", post(draw_symbols))
        .route("/api/v1/stream_entropy", get(stream_entropy))
        .route("/api/v1/audit/logs", get(audit_logs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok())
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.generator.ready() {
        (StatusCode::OK, Json(HealthResponse::ok()))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::seeding(0, 1)),
        )
    }
}

async fn slot_5x3(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    auth::require_auth(&state.auth, auth_header(&headers), b"")?;
    let mut source = state.generator.as_ref();
    let drawn_numbers = sampling::slot_5x3(&mut source).await?;
    Ok(Json(SlotResponse {
        game: "slot_5x3",
        drawn_numbers,
        status: "success",
    }))
}

async fn draw_numbers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    auth::require_auth(&state.auth, auth_header(&headers), &body)?;
    let req: DrawNumbersRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidInput(format!("malformed request body: {e}")))?;

    let mut source = state.generator.as_ref();
    let drawn_numbers = sampling::draw_numbers(&mut source, &req.ranges).await?;
    Ok(Json(DrawNumbersResponse {
        status: "success",
        drawn_numbers,
    }))
}

async fn draw_symbols(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    auth::require_auth(&state.auth, auth_header(&headers), &body)?;
    let req: DrawSymbolsRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidInput(format!("malformed request body: {e}")))?;
    if req.num_draws == 0 {
        return Err(ApiError::InvalidInput(
            "num_draws must be at least 1".to_string(),
        ));
    }

    let mut source = state.generator.as_ref();
    let drawn_symbols = sampling::draw_weighted(&mut source, &req.symbols, req.num_draws).await?;
    Ok(Json(DrawSymbolsResponse {
        status: "success",
        drawn_symbols,
    }))
}

/// Unbounded octet stream, one `STREAM_CHUNK`-byte `generate()` call per
/// network write (`spec.md` §4.2.6). Like the mixer's `/seed`, failures
/// here are bare status codes, never a JSON envelope, because the
/// successful body is itself binary.
async fn stream_entropy(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(err) = auth::require_auth(&state.auth, auth_header(&headers), b"") {
        return (err.status_code(), Vec::new()).into_response();
    }

    let generator = state.generator.clone();
    let chunks = stream::unfold(generator, |generator| async move {
        match generator.generate(STREAM_CHUNK).await {
            Ok(bytes) => Some((Ok::<_, std::io::Error>(Bytes::from(bytes)), generator)),
            Err(err) => {
                tracing::error!(error = %err, "entropy stream terminated by fatal error");
                None
            }
        }
    });

    (
        StatusCode::OK,
        [("content-type", "application/octet-stream")],
        Body::from_stream(chunks),
    )
        .into_response()
}

/// Audit log file download (`spec.md` §4.2.7). 404 if the file does not
/// yet exist (service has logged nothing, or `AUDIT_LOG_DIR` is fresh).
async fn audit_logs(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(err) = auth::require_auth(&state.auth, auth_header(&headers), b"") {
        return err.into_response();
    }

    let path = csprng_common::logging::audit_log_path();
    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    let stream = tokio_util::io::ReaderStream::new(file);
    (
        StatusCode::OK,
        [
            ("content-type", "application/octet-stream"),
            (
                "content-disposition",
                "attachment; filename=\"audit.log\"",
            ),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}

