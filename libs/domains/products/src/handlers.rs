//! HTTP handlers for Products API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, require_admin, require_seller_or_admin, JwtAuth, JwtClaims, UuidPath,
    ValidatedJson,
};
use domain_users::SellerSummary;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, Product, ProductFilter, ProductOrder, ProductPage, ProductView, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use domain_users::UserRepository;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        seed_products,
        get_product,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, ProductView, ProductPage, CreateProduct, UpdateProduct,
            ProductFilter, ProductOrder, SellerSummary
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints.
///
/// Listing, fetching and seeding are public; create/update require a seller
/// or admin token and delete requires an admin token.
pub fn router<R, S>(service: ProductService<R, S>, auth: JwtAuth) -> Router
where
    R: ProductRepository + 'static,
    S: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_products))
        .route("/seed", post(seed_products))
        .route("/{id}", get(get_product))
        .with_state(Arc::clone(&shared_service));

    // Layer order matters: the auth middleware must run before the role
    // guard so the guard sees the claims in request extensions.
    let seller_or_admin = Router::new()
        .route("/", post(create_product))
        .route("/{id}", put(update_product))
        .layer(middleware::from_fn(require_seller_or_admin))
        .layer(middleware::from_fn_with_state(
            auth.clone(),
            jwt_auth_middleware,
        ))
        .with_state(Arc::clone(&shared_service));

    let admin_only = Router::new()
        .route("/{id}", delete(delete_product))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service);

    public.merge(seller_or_admin).merge(admin_only)
}

/// List one page of products with optional name and price filters
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "One page of products with paging metadata", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, S: UserRepository>(
    State(service): State<Arc<ProductService<R, S>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(filter).await?;
    Ok(Json(page))
}

/// Insert the built-in sample catalog
#[utoipa::path(
    post,
    path = "/seed",
    tag = "Products",
    responses(
        (status = 201, description = "Sample products created", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seed_products<R: ProductRepository, S: UserRepository>(
    State(service): State<Arc<ProductService<R, S>>>,
) -> ProductResult<impl IntoResponse> {
    let products = service.seed_products().await?;
    Ok((StatusCode::CREATED, Json(products)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, S: UserRepository>(
    State(service): State<Arc<ProductService<R, S>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductView>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Create a new product owned by the authenticated seller
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, S: UserRepository>(
    State(service): State<Arc<ProductService<R, S>>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let seller = claims
        .user_id()
        .map_err(|_| ProductError::Validation("Invalid token subject".to_string()))?;

    let product = service.create_product(input, seller).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, S: UserRepository>(
    State(service): State<Arc<ProductService<R, S>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, S: UserRepository>(
    State(service): State<Arc<ProductService<R, S>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use axum_helpers::JwtConfig;
    use domain_users::{User, UserResult};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    /// In-memory stand-in for the users repository
    struct StubUsers {
        users: Vec<User>,
    }

    #[async_trait]
    impl UserRepository for StubUsers {
        async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
            Ok(self.users.iter().find(|u| u.id == id).cloned())
        }

        async fn get_by_ids(&self, ids: &[Uuid]) -> UserResult<Vec<User>> {
            Ok(self
                .users
                .iter()
                .filter(|u| ids.contains(&u.id))
                .cloned()
                .collect())
        }

        async fn find_first_seller(&self) -> UserResult<Option<User>> {
            Ok(self.users.iter().find(|u| u.is_seller).cloned())
        }

        async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
            Ok(self.users.iter().any(|u| u.email == email))
        }

        async fn insert_many(&self, users: Vec<User>) -> UserResult<Vec<User>> {
            Ok(users)
        }
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("handler-test-secret"))
    }

    fn app(products: MockProductRepository, users: Vec<User>) -> Router {
        let service = ProductService::new(products, StubUsers { users });
        router(service, auth())
    }

    fn token(is_seller: bool, is_admin: bool) -> String {
        auth()
            .create_token(Uuid::now_v7(), "Test User", "t@example.com", is_seller, is_admin)
            .unwrap()
    }

    async fn json_body(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_product() -> Product {
        Product::new(
            CreateProduct {
                name: "Slim Fit Shirt".to_string(),
                description: "Lightweight cotton shirt".to_string(),
                image: "/images/p1.jpg".to_string(),
                price: 12000,
                count_in_stock: 10,
            },
            Uuid::now_v7(),
        )
    }

    #[tokio::test]
    async fn test_list_products_returns_page_envelope() {
        let product = sample_product();

        let mut products = MockProductRepository::new();
        products.expect_count().returning(|_| Ok(1));
        let listed = product.clone();
        products
            .expect_list()
            .returning(move |_| Ok(vec![listed.clone()]));

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?name=shirt&page=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["pages"], 1);
        assert_eq!(body["total"], 1);
        assert_eq!(body["products"][0]["name"], "Slim Fit Shirt");
    }

    #[tokio::test]
    async fn test_get_product_unknown_id_is_404() {
        let mut products = MockProductRepository::new();
        products.expect_get_by_id().returning(|_| Ok(None));

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_product_invalid_uuid_is_400() {
        let products = MockProductRepository::new();

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_seed_without_seller_is_500() {
        let mut products = MockProductRepository::new();
        products.expect_insert_many().never();

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/seed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response.into_body()).await;
        assert!(body["message"].as_str().unwrap().contains("No seller found"));
    }

    #[tokio::test]
    async fn test_seed_with_seller_is_201() {
        let seller = User::new("Maya Chen", "maya@example.com", true, false, None);

        let mut products = MockProductRepository::new();
        products.expect_insert_many().returning(Ok);

        let app = app(products, vec![seller]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/seed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response.into_body()).await;
        assert!(body.as_array().unwrap().len() > 1);
    }

    #[tokio::test]
    async fn test_create_without_token_is_401() {
        let products = MockProductRepository::new();

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"name": "X", "image": "/i.jpg", "price": 1}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_with_plain_user_token_is_403() {
        let products = MockProductRepository::new();

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("authorization", format!("Bearer {}", token(false, false)))
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"name": "X", "image": "/i.jpg", "price": 1}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_with_seller_token_is_201() {
        let mut products = MockProductRepository::new();
        products.expect_exists_by_name().returning(|_| Ok(false));
        products.expect_insert().returning(Ok);

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("authorization", format!("Bearer {}", token(true, false)))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "name": "Canvas Tote",
                            "description": "Sturdy everyday bag",
                            "image": "/images/p7.jpg",
                            "price": 4500,
                            "count_in_stock": 8
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["name"], "Canvas Tote");
    }

    #[tokio::test]
    async fn test_create_with_invalid_body_is_400() {
        let products = MockProductRepository::new();

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("authorization", format!("Bearer {}", token(true, false)))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        // Empty name fails validation
                        json!({"name": "", "image": "/i.jpg", "price": 1}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_409() {
        let mut products = MockProductRepository::new();
        products.expect_exists_by_name().returning(|_| Ok(true));

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("authorization", format!("Bearer {}", token(true, false)))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"name": "Slim Fit Shirt", "image": "/i.jpg", "price": 1}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_with_seller_token_returns_product() {
        let existing = sample_product();
        let id = existing.id;

        let mut products = MockProductRepository::new();
        let fetched = existing.clone();
        products
            .expect_get_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        products.expect_update().returning(move |_, input| {
            let mut updated = existing.clone();
            updated.apply_update(input);
            Ok(updated)
        });

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/{}", id))
                    .header("authorization", format!("Bearer {}", token(true, false)))
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"price": 9900}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["price"], 9900);
    }

    #[tokio::test]
    async fn test_delete_with_seller_token_is_403() {
        let products = MockProductRepository::new();

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", Uuid::now_v7()))
                    .header("authorization", format!("Bearer {}", token(true, false)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_with_admin_token_is_204() {
        let existing = sample_product();
        let id = existing.id;

        let mut products = MockProductRepository::new();
        products
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        products.expect_delete().returning(|_| Ok(true));

        let app = app(products, Vec::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", id))
                    .header("authorization", format!("Bearer {}", token(false, true)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
