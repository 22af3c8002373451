//! Drives the real generator `axum::Router` (and, where needed, a real
//! mixer alongside it) over HTTP on ephemeral ports.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use parking_lot::Mutex as SyncMutex;

use csprng_common::auth::AuthKey;
use csprng_common::AUTH_HEADER;
use csprng_generator::generator::Generator;
use csprng_generator::mixer_client::MixerClient;
use csprng_generator::routes::{self, AppState};
use csprng_mixer::pool::EntropyPool;
use csprng_mixer::routes as mixer_routes;

const KEY: &[u8] = b"test-secret-key";

fn sign(body: &[u8]) -> String {
    AuthKey::from_bytes(KEY).sign(body)
}

async fn spawn_mixer() -> String {
    let (base, _seed_requests) = spawn_mixer_counting_seed_requests().await;
    base
}

/// Same as `spawn_mixer`, but also counts `GET /api/v1/seed` requests so
/// tests can assert exactly how many rekeys occurred.
async fn spawn_mixer_counting_seed_requests() -> (String, Arc<AtomicUsize>) {
    let state = Arc::new(mixer_routes::AppState {
        pool: SyncMutex::new(EntropyPool::new()),
        auth: AuthKey::from_bytes(KEY),
    });
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_for_layer = counter.clone();
    let app = mixer_routes::router(state).layer(middleware::from_fn(move |req: Request, next: Next| {
        let counter = counter_for_layer.clone();
        async move {
            if req.uri().path() == "/api/v1/seed" {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            next.run(req).await
        }
    }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), counter)
}

async fn seed_mixer(base: &str) {
    let client = reqwest::Client::new();
    for i in 1..=3u8 {
        let digest = [i; 32];
        let sig = sign(&digest);
        client
            .post(format!("{base}/api/v1/entropy"))
            .header(AUTH_HEADER, sig)
            .body(digest.to_vec())
            .send()
            .await
            .unwrap();
    }
}

async fn spawn_generator(mixer_url: String, rekey_threshold: u64) -> (String, Arc<Generator>) {
    let mixer = MixerClient::new(mixer_url, AuthKey::from_bytes(KEY));
    let generator = Arc::new(Generator::with_rekey_threshold(mixer, rekey_threshold));
    let state = Arc::new(AppState {
        generator: generator.clone(),
        auth: AuthKey::from_bytes(KEY),
    });
    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), generator)
}

#[tokio::test]
async fn health_reflects_initialization_state() {
    let mixer_base = spawn_mixer().await;
    let (gen_base, generator) = spawn_generator(mixer_base.clone(), u64::MAX).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{gen_base}/api/v1/health")).send().await.unwrap();
    assert_eq!(resp.status(), 503);

    generator.install_seed([1u8; 64]).await;

    let resp = client.get(format!("{gen_base}/api/v1/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn property_7_hmac_enforcement_on_slot_endpoint() {
    let mixer_base = spawn_mixer().await;
    let (gen_base, generator) = spawn_generator(mixer_base, u64::MAX).await;
    generator.install_seed([2u8; 64]).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{gen_base}/api/v1/games/slot_5x3")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .get(format!("{gen_base}/api/v1/games/slot_5x3"))
        .header(AUTH_HEADER, "deadbeef".repeat(8))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let sig = sign(b"");
    let resp = client
        .get(format!("{gen_base}/api/v1/games/slot_5x3"))
        .header(AUTH_HEADER, sig)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn scenario_b_draw_numbers_with_installed_zero_seed() {
    let mixer_base = spawn_mixer().await;
    let (gen_base, generator) = spawn_generator(mixer_base, u64::MAX).await;
    generator.install_seed([0u8; 64]).await;
    let client = reqwest::Client::new();

    let body = serde_json::json!({"ranges": [[1, 6], [1, 6], [0, 1]]});
    let bytes = serde_json::to_vec(&body).unwrap();
    let sig = sign(&bytes);

    let resp = client
        .post(format!("{gen_base}/api/v1/rng/draw_numbers"))
        .header(AUTH_HEADER, sig)
        .header("content-type", "application/json")
        .body(bytes)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["drawn_numbers"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn draw_numbers_rejects_inverted_range() {
    let mixer_base = spawn_mixer().await;
    let (gen_base, generator) = spawn_generator(mixer_base, u64::MAX).await;
    generator.install_seed([1u8; 64]).await;
    let client = reqwest::Client::new();

    let body = serde_json::json!({"ranges": [[9, 1]]});
    let bytes = serde_json::to_vec(&body).unwrap();
    let sig = sign(&bytes);

    let resp = client
        .post(format!("{gen_base}/api/v1/rng/draw_numbers"))
        .header(AUTH_HEADER, sig)
        .body(bytes)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn scenario_d_symbols_draw() {
    let mixer_base = spawn_mixer().await;
    let (gen_base, generator) = spawn_generator(mixer_base, u64::MAX).await;
    generator.install_seed([3u8; 64]).await;
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "symbols": [{"name": "X", "weight": 2}, {"name": "Y", "weight": 1}],
        "num_draws": 3,
    });
    let bytes = serde_json::to_vec(&body).unwrap();
    let sig = sign(&bytes);

    let resp = client
        .post(format!("{gen_base}/api/v1/games/draw_symbols"))
        .header(AUTH_HEADER, sig)
        .body(bytes)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    let drawn = json["drawn_symbols"].as_array().unwrap();
    assert_eq!(drawn.len(), 3);
    for v in drawn {
        let s = v.as_str().unwrap();
        assert!(s == "X" || s == "Y");
    }
}

#[tokio::test]
async fn scenario_c_slot_5x3_shape() {
    let mixer_base = spawn_mixer().await;
    let (gen_base, generator) = spawn_generator(mixer_base, u64::MAX).await;
    generator.install_seed([4u8; 64]).await;
    let client = reqwest::Client::new();

    let sig = sign(b"");
    let resp = client
        .get(format!("{gen_base}/api/v1/games/slot_5x3"))
        .header(AUTH_HEADER, sig)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    let numbers = json["drawn_numbers"].as_array().unwrap();
    assert_eq!(numbers.len(), 15);
    for v in numbers {
        let n = v.as_u64().unwrap();
        assert!(n <= 9);
    }
}

#[tokio::test]
async fn scenario_e_rekey_boundary_pulls_exactly_one_fresh_seed() {
    let (mixer_base, seed_requests) = spawn_mixer_counting_seed_requests().await;
    seed_mixer(&mixer_base).await;
    let (gen_base, generator) = spawn_generator(mixer_base, 1024).await;
    generator.install_seed([0u8; 64]).await;
    let client = reqwest::Client::new();

    let sig = sign(b"");
    // `/stream_entropy` never ends on its own, so read a bounded prefix
    // (two 1 KiB chunks, crossing the 1024-byte rekey threshold once) and
    // drop the response rather than draining the infinite body.
    let mut resp = client
        .get(format!("{gen_base}/api/v1/stream_entropy"))
        .header(AUTH_HEADER, sig)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let mut received = 0usize;
    while received < 2048 {
        match resp.chunk().await.unwrap() {
            Some(chunk) => received += chunk.len(),
            None => break,
        }
    }
    drop(resp);
    assert!(received >= 2048, "stream ended early after {received} bytes");

    assert_eq!(seed_requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn audit_logs_returns_404_when_absent() {
    let dir = tempdir();
    std::env::set_var("AUDIT_LOG_DIR", &dir);
    let mixer_base = spawn_mixer().await;
    let (gen_base, generator) = spawn_generator(mixer_base, u64::MAX).await;
    generator.install_seed([6u8; 64]).await;
    let client = reqwest::Client::new();

    let sig = sign(b"");
    let resp = client
        .get(format!("{gen_base}/api/v1/audit/logs"))
        .header(AUTH_HEADER, sig)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

fn tempdir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("csprng-audit-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
