use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Tag every request with an id, log the outcome and echo the id back
/// in `x-request-id`.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let request_id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = std::time::Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(request_id, %method, path, status = status.as_u16(), latency_ms);
    } else {
        tracing::info!(request_id, %method, path, status = status.as_u16(), latency_ms);
    }

    response
        .headers_mut()
        .insert("x-request-id", HeaderValue::from(request_id));

    response
}
