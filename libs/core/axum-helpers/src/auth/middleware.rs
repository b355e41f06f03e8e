use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

/// JWT authentication middleware
///
/// Validates JWT tokens from Authorization header or cookies.
/// Inserts JwtClaims into request extensions on success.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::{JwtAuth, jwt_auth_middleware};
///
/// let protected_routes = Router::new()
///     .route("/api/protected", post(protected_handler))
///     .layer(axum::middleware::from_fn_with_state(
///         auth.clone(),
///         jwt_auth_middleware
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No JWT found in Authorization header or cookie");
            return Err(
                AppError::Unauthorized("No token provided".to_string()).into_response()
            );
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(AppError::Unauthorized("Invalid token".to_string()).into_response());
        }
    };

    // Token is valid - insert claims into request extensions
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Role guard: the authenticated user must be a seller or an admin.
///
/// Must be layered AFTER (inside) `jwt_auth_middleware` so the claims are
/// present in request extensions. Responds 401 when no claims are present
/// and 403 when the role check fails.
pub async fn require_seller_or_admin(request: Request, next: Next) -> Result<Response, Response> {
    match request.extensions().get::<JwtClaims>() {
        Some(claims) if claims.is_seller || claims.is_admin => Ok(next.run(request).await),
        Some(claims) => {
            tracing::debug!(user = %claims.sub, "Seller or admin role required");
            Err(AppError::Forbidden("Seller or admin access required".to_string()).into_response())
        }
        None => Err(AppError::Unauthorized("No token provided".to_string()).into_response()),
    }
}

/// Role guard: the authenticated user must be an admin.
///
/// Must be layered AFTER (inside) `jwt_auth_middleware` so the claims are
/// present in request extensions. Responds 401 when no claims are present
/// and 403 when the role check fails.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Response> {
    match request.extensions().get::<JwtClaims>() {
        Some(claims) if claims.is_admin => Ok(next.run(request).await),
        Some(claims) => {
            tracing::debug!(user = %claims.sub, "Admin role required");
            Err(AppError::Forbidden("Admin access required".to_string()).into_response())
        }
        None => Err(AppError::Unauthorized("No token provided".to_string()).into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-test-secret"))
    }

    fn protected_app(auth: JwtAuth, admin_only: bool) -> Router {
        let router = Router::new().route("/", get(ok_handler));
        let router = if admin_only {
            router.layer(middleware::from_fn(require_admin))
        } else {
            router.layer(middleware::from_fn(require_seller_or_admin))
        };
        router.layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    fn request_with_token(token: Option<&str>) -> axum::http::Request<Body> {
        let builder = axum::http::Request::builder().method("GET").uri("/");
        let builder = match token {
            Some(t) => builder.header("authorization", format!("Bearer {}", t)),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let app = protected_app(auth(), false);
        let response = app.oneshot(request_with_token(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let app = protected_app(auth(), false);
        let response = app
            .oneshot(request_with_token(Some("garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_seller_passes_seller_guard() {
        let auth = auth();
        let token = auth
            .create_token(Uuid::now_v7(), "Seller", "s@example.com", true, false)
            .unwrap();
        let app = protected_app(auth, false);
        let response = app.oneshot(request_with_token(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_plain_user_fails_seller_guard() {
        let auth = auth();
        let token = auth
            .create_token(Uuid::now_v7(), "Buyer", "b@example.com", false, false)
            .unwrap();
        let app = protected_app(auth, false);
        let response = app.oneshot(request_with_token(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_seller_fails_admin_guard() {
        let auth = auth();
        let token = auth
            .create_token(Uuid::now_v7(), "Seller", "s@example.com", true, false)
            .unwrap();
        let app = protected_app(auth, true);
        let response = app.oneshot(request_with_token(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_passes_admin_guard() {
        let auth = auth();
        let token = auth
            .create_token(Uuid::now_v7(), "Admin", "a@example.com", false, true)
            .unwrap();
        let app = protected_app(auth, true);
        let response = app.oneshot(request_with_token(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cookie_token_is_accepted() {
        let auth = auth();
        let token = auth
            .create_token(Uuid::now_v7(), "Seller", "s@example.com", true, false)
            .unwrap();
        let app = protected_app(auth, false);

        let request = axum::http::Request::builder()
            .method("GET")
            .uri("/")
            .header("cookie", format!("access_token={}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
