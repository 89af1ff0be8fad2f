use axum::{http::StatusCode, response::IntoResponse};
use tracing::warn;

const STRIPE_STATUS_URL: &str = "https://status.stripe.com/";

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "NOT_FOUND").into_response()
}

/// Liveness probe delegated to the payment provider's status page.
pub async fn health_check() -> impl IntoResponse {
    match reqwest::get(STRIPE_STATUS_URL).await {
        Ok(resp) if resp.status().is_success() => (StatusCode::OK, "OK").into_response(),
        Ok(resp) => {
            warn!(status = %resp.status(), "health_check: stripe status page degraded");
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE").into_response()
        }
        Err(err) => {
            warn!(error = %err, "health_check: stripe status page unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE").into_response()
        }
    }
}
