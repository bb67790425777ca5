use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// One line per request: method, path, status, elapsed time.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    log::info!(
        "{} {} {} - {:.1} ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    response
}
