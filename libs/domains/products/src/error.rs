use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_users::UserError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No seller found. Seed users first via /api/users/seed")]
    NoSellerAvailable,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::DuplicateName(name) => {
                AppError::Conflict(format!("Product with name '{}' already exists", name))
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            // The seed precondition is a server-side setup problem, not a
            // client error: surface it as a 500.
            ProductError::NoSellerAvailable => AppError::InternalServerError(
                "No seller found. Seed users first via /api/users/seed".to_string(),
            ),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

/// Seller lookups go through the users domain; its failures surface as
/// database errors here.
impl From<UserError> for ProductError {
    fn from(err: UserError) -> Self {
        ProductError::Database(err.to_string())
    }
}
