//! JSON body extractor that runs `validator` checks before the handler.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Like `Json<T>`, but the payload must also pass its `Validate` impl.
/// Failures produce a structured 400 listing the offending fields.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1, max = 200))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) { ... }
/// ```
pub struct ValidatedJson<T>(pub T);

fn validation_response(errors: ValidationErrors) -> Response {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let entries: Vec<serde_json::Value> = field_errors
            .iter()
            .map(|err| {
                serde_json::json!({
                    "code": err.code,
                    "message": err.message,
                    "params": err.params,
                })
            })
            .collect();
        details.insert(field.to_string(), serde_json::Value::Array(entries));
    }

    let body = ErrorResponse {
        code: ErrorCode::ValidationError.code(),
        error: ErrorCode::ValidationError.as_str().to_string(),
        message: ErrorCode::ValidationError.default_message().to_string(),
        details: Some(serde_json::Value::Object(details)),
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match payload.validate() {
            Ok(()) => Ok(ValidatedJson(payload)),
            Err(errors) => Err(validation_response(errors)),
        }
    }
}
