//! HTTP handlers for Users API

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use axum_helpers::errors::responses::{ConflictResponse, InternalServerErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{SellerProfile, SellerSummary, User};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(seed_users),
    components(
        schemas(User, SellerProfile, SellerSummary),
        responses(ConflictResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Users", description = "User seeding and seller lookups")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/seed", post(seed_users))
        .with_state(shared_service)
}

/// Insert the built-in sample users
#[utoipa::path(
    post,
    path = "/seed",
    tag = "Users",
    responses(
        (status = 201, description = "Sample users created", body = Vec<User>),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seed_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<impl IntoResponse> {
    let users = service.seed_users().await?;
    Ok((StatusCode::CREATED, Json(users)))
}
