use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::sync::Mutex;

pub mod upstream;

pub use upstream::{RainUpstream, UpstreamError, UpstreamSource};

/// Generic localized error message returned whenever the upstream fetch
/// fails, matching the public dashboard's contract.
pub const FETCH_ERROR_MESSAGE: &str = "無法獲取雨量數據";

struct CachedBody {
    body: String,
    stored_at: Instant,
}

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    upstream: Arc<dyn UpstreamSource>,
    cache: Mutex<Option<CachedBody>>,
    cache_ttl: Duration,
}

pub fn build_app(
    upstream: Arc<dyn UpstreamSource>,
    cache_ttl: Duration,
) -> (Router, Arc<AppState>) {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter()
        .with_registry(registry.clone())
        .build()
        .expect("prom exporter");
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("rainwatch-server");

    let requests_total = meter
        .u64_counter("rainwatch_requests_total")
        .with_description("Total HTTP requests served")
        .init();

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        upstream,
        cache: Mutex::new(None),
        cache_ttl,
    });

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/rain", get(rain))
        .with_state(Arc::clone(&state));

    (router, state)
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

fn json_body(body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/json"),
        )],
        body,
    )
}

/// Cached pass-through of the upstream rainfall payload.
///
/// Fresh cache entries are served as-is; a miss or expiry triggers one
/// upstream fetch. The body is never transformed or validated. A failed
/// fetch returns the generic localized envelope and leaves any previously
/// cached body in place for the next expiry cycle.
async fn rain(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);

    {
        let cache = state.cache.lock().await;
        if let Some(entry) = cache.as_ref() {
            if entry.stored_at.elapsed() < state.cache_ttl {
                return json_body(entry.body.clone()).into_response();
            }
        }
    }

    match state.upstream.fetch_raw().await {
        Ok(body) => {
            let mut cache = state.cache.lock().await;
            *cache = Some(CachedBody {
                body: body.clone(),
                stored_at: Instant::now(),
            });
            json_body(body).into_response()
        }
        Err(e) => {
            tracing::warn!(error=?e, "upstream rainfall fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": FETCH_ERROR_MESSAGE })),
            )
                .into_response()
        }
    }
}
