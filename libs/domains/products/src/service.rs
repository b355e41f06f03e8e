//! Product Service - Business logic layer

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use domain_users::{SellerSummary, UserRepository};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductPage, ProductView, UpdateProduct};
use crate::repository::ProductRepository;
use crate::seed::sample_products;

/// Product service providing business logic operations
///
/// The service layer handles validation, business rules, seller reference
/// resolution, and orchestrates repository operations.
pub struct ProductService<R: ProductRepository, S: UserRepository> {
    products: Arc<R>,
    users: Arc<S>,
}

impl<R: ProductRepository, S: UserRepository> ProductService<R, S> {
    /// Create a new ProductService over the product and user repositories
    pub fn new(products: R, users: S) -> Self {
        Self {
            products: Arc::new(products),
            users: Arc::new(users),
        }
    }

    /// List one page of products matching the filter, with sellers resolved
    #[instrument(skip(self, filter), fields(page = filter.normalized_page()))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<ProductPage> {
        let total = self.products.count(&filter).await?;
        let products = self.products.list(&filter).await?;
        let views = self.populate(products).await?;

        Ok(ProductPage::new(
            views,
            filter.normalized_page(),
            filter.normalized_page_size(),
            total,
        ))
    }

    /// Get a product by ID, with its seller resolved
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<ProductView> {
        let product = self
            .products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut views = self.populate(vec![product]).await?;
        // populate() preserves length
        Ok(views.remove(0))
    }

    /// Insert the built-in sample catalog, attached to an existing seller.
    ///
    /// Fails when no user is flagged as a seller (seed users first).
    #[instrument(skip(self))]
    pub async fn seed_products(&self) -> ProductResult<Vec<Product>> {
        let seller = self
            .users
            .find_first_seller()
            .await?
            .ok_or(ProductError::NoSellerAvailable)?;

        let products = sample_products(seller.id);
        let created = self.products.insert_many(products).await?;

        tracing::info!(count = created.len(), seller_id = %seller.id, "Sample products seeded");
        Ok(created)
    }

    /// Create a new product owned by the given seller
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(
        &self,
        input: CreateProduct,
        seller: Uuid,
    ) -> ProductResult<Product> {
        // Validate input
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        // Check for duplicate name
        if self.products.exists_by_name(&input.name).await? {
            return Err(ProductError::DuplicateName(input.name.clone()));
        }

        self.products.insert(Product::new(input, seller)).await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        // Validate input
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        // Check if product exists
        let existing = self
            .products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        // Check for duplicate name if being changed
        if let Some(ref new_name) = input.name {
            if new_name != &existing.name && self.products.exists_by_name(new_name).await? {
                return Err(ProductError::DuplicateName(new_name.clone()));
            }
        }

        self.products.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        // Check if product exists
        if self.products.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.products.delete(id).await?;
        Ok(())
    }

    /// Resolve seller references into summaries ("populate").
    ///
    /// Products whose seller no longer exists keep a null seller rather
    /// than failing the whole request.
    async fn populate(&self, products: Vec<Product>) -> ProductResult<Vec<ProductView>> {
        let mut seller_ids: Vec<Uuid> = products.iter().map(|p| p.seller).collect();
        seller_ids.sort_unstable();
        seller_ids.dedup();

        let sellers: HashMap<Uuid, SellerSummary> = self
            .users
            .get_by_ids(&seller_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.seller_summary()))
            .collect();

        Ok(products
            .into_iter()
            .map(|product| {
                let seller = sellers.get(&product.seller).cloned();
                product.into_view(seller)
            })
            .collect())
    }
}

impl<R: ProductRepository, S: UserRepository> Clone for ProductService<R, S> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            users: Arc::clone(&self.users),
        }
    }
}
