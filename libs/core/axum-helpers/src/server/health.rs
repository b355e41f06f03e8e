use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;

/// Liveness payload: the process is up and knows who it is.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed health probe; resolves to `Err(reason)` when the dependency is
/// unavailable.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Run named dependency probes concurrently and fold them into a readiness
/// response.
///
/// All probes pass: `Ok((200, {"status": "ready", "<name>": "connected"}))`.
/// Any probe fails: `Err((503, ...))` with the failing dependencies marked
/// `"disconnected"`, so the handler can `?`-style return either arm.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![
///     ("mongodb", Box::pin(async move { probe().await.map_err(|e| e.to_string()) })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let outcomes = join_all(probes).await;

    let mut body = serde_json::Map::new();
    let mut all_ready = true;

    for (name, outcome) in names.into_iter().zip(outcomes) {
        let status = match outcome {
            Ok(()) => "connected",
            Err(reason) => {
                tracing::error!("Readiness check failed: {} error: {}", name, reason);
                all_ready = false;
                "disconnected"
            }
        };
        body.insert(name.to_string(), json!(status));
    }

    body.insert(
        "status".to_string(),
        json!(if all_ready { "ready" } else { "not ready" }),
    );

    let payload = Json(Value::Object(body));
    if all_ready {
        Ok((StatusCode::OK, payload))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, payload))
    }
}

async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Router serving `/health` liveness with the app's name and version.
///
/// ```ignore
/// let app = router.merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_probes_passing_is_ready() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("mongodb", Box::pin(async { Ok(()) })),
            ("queue", Box::pin(async { Ok(()) })),
        ];

        let (status, Json(body)) = run_health_checks(checks).await.expect("should be ready");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["mongodb"], "connected");
        assert_eq!(body["queue"], "connected");
    }

    #[tokio::test]
    async fn test_one_failing_probe_is_503() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("mongodb", Box::pin(async { Err("timeout".to_string()) })),
            ("queue", Box::pin(async { Ok(()) })),
        ];

        let (status, Json(body)) = run_health_checks(checks)
            .await
            .expect_err("a failing probe should propagate");
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
        assert_eq!(body["queue"], "connected");
    }
}
