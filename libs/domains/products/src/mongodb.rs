//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductOrder, UpdateProduct};
use crate::repository::ProductRepository;

/// MongoDB-backed product repository over the `products` collection.
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
}

fn index(keys: Document, name: &str, unique: bool) -> IndexModel {
    let options = IndexOptions::builder()
        .name(name.to_string())
        .unique(unique)
        .build();
    IndexModel::builder().keys(keys).options(options).build()
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Create the indexes the catalog queries rely on: the unique name
    /// constraint, price range/ordering, recency ordering, and per-seller
    /// lookups.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        self.collection
            .create_indexes([
                index(doc! { "name": 1 }, "idx_name_unique", true),
                index(doc! { "price": 1 }, "idx_price", false),
                index(doc! { "created_at": -1 }, "idx_created_at", false),
                index(doc! { "seller": 1 }, "idx_seller", false),
            ])
            .await?;

        tracing::info!("Product indexes ensured");
        Ok(())
    }

    /// The underlying collection, for operations outside the trait.
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Translate a [`ProductFilter`] into a filter document.
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut query = doc! {};

        if let Some(name) = filter.name_query() {
            // Escape so user input always matches literally
            query.insert(
                "name",
                doc! { "$regex": regex::escape(name), "$options": "i" },
            );
        }

        if let Some((min, max)) = filter.price_range() {
            query.insert("price", doc! { "$gte": min, "$lte": max });
        }

        query
    }

    /// Sort document for a listing order.
    fn sort_doc(order: ProductOrder) -> Document {
        match order {
            ProductOrder::Lowest => doc! { "price": 1 },
            ProductOrder::Highest => doc! { "price": -1 },
            ProductOrder::Newest => doc! { "created_at": -1 },
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product inserted");
        Ok(product)
    }

    #[instrument(skip(self, products), fields(product_count = products.len()))]
    async fn insert_many(&self, products: Vec<Product>) -> ProductResult<Vec<Product>> {
        if products.is_empty() {
            return Ok(products);
        }

        self.collection.insert_many(&products).await?;

        tracing::info!(count = products.len(), "Products inserted");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, filter), fields(page = filter.normalized_page()))]
    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(Self::build_filter(filter))
            .sort(Self::sort_doc(filter.order))
            .skip(filter.skip())
            .limit(filter.normalized_page_size())
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        Ok(self
            .collection
            .count_documents(Self::build_filter(filter))
            .await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut product = self
            .collection
            .find_one(id_filter(id))
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.apply_update(input);
        self.collection.replace_one(id_filter(id), &product).await?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "name": name })
            .await?;
        Ok(count > 0)
    }
}
