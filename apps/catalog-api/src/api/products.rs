//! Products API routes

use axum::Router;
use domain_products::{handlers, MongoProductRepository, ProductService};
use domain_users::MongoUserRepository;

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let products = MongoProductRepository::new(&state.db);
    let users = MongoUserRepository::new(&state.db);
    let service = ProductService::new(products, users);
    handlers::router(service, state.auth.clone())
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
