//! Catalog API - REST server for the product catalog

use axum_helpers::server::health_router;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use axum_helpers::JwtAuth;
use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Connect to MongoDB
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // Initialize the application state
    let auth = JwtAuth::new(&config.jwt);
    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
        auth,
    };

    // Initialize indexes
    api::init_indexes(&state).await?;

    // Build the router
    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::ready_router(state.clone()));

    info!("Starting Catalog API on port {}", state.config.server.port);

    // Run server with graceful shutdown
    axum_helpers::create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            drop(state.mongo_client);
            info!("MongoDB connection closed");
        },
    )
    .await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
