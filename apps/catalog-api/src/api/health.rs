//! Readiness endpoint backed by a MongoDB connectivity probe.
//!
//! The liveness `/health` endpoint comes from `axum_helpers::health_router`;
//! this module adds `/ready`, which reports 503 until MongoDB is reachable.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> Response {
    let client = state.mongo_client.clone();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async move {
            let status = database::mongodb::check_health_detailed(&client).await;
            if status.healthy {
                Ok(())
            } else {
                Err(status
                    .message
                    .unwrap_or_else(|| "MongoDB unreachable".to_string()))
            }
        }),
    )];

    match run_health_checks(checks).await {
        Ok(response) => response.into_response(),
        Err(response) => response.into_response(),
    }
}

pub fn ready_router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
