use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends (MongoDB, PostgreSQL, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Insert a batch of products (seeding)
    async fn insert_many(&self, products: Vec<Product>) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Fetch one page of products matching the filter, sorted per its order
    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>>;

    /// Count products matching the filter (ignoring pagination)
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64>;

    /// Update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Check if a product name exists
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool>;
}
