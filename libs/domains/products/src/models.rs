use chrono::{DateTime, Utc};
use domain_users::SellerSummary;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Default number of products per listing page
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Upper bound on requested page sizes
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sort order for product listings
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductOrder {
    /// Cheapest first (price ascending)
    Lowest,
    /// Most expensive first (price descending)
    Highest,
    /// Most recently created first
    #[default]
    Newest,
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name (unique across the catalog)
    pub name: String,
    /// Product description
    pub description: String,
    /// Product image URL
    pub image: String,
    /// Price in cents (for precision)
    pub price: i64,
    /// Current stock quantity
    pub count_in_stock: i32,
    /// Owning seller (reference into the users collection)
    pub seller: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// API projection of a product with the seller reference resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Price in cents
    pub price: i64,
    pub count_in_stock: i32,
    /// Resolved seller summary; null when the referenced user is gone
    pub seller: Option<SellerSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 500))]
    pub image: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub count_in_stock: i32,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub image: Option<String>,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub count_in_stock: Option<i32>,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name
    pub name: Option<String>,
    /// Minimum price in cents; 0 disables the price filter
    pub min: Option<i64>,
    /// Maximum price in cents; 0 disables the price filter
    pub max: Option<i64>,
    /// Sort order
    #[serde(default)]
    pub order: ProductOrder,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Products per page (clamped to 1..=100)
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            name: None,
            min: None,
            max: None,
            order: ProductOrder::default(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl ProductFilter {
    /// 1-based page number; page 0 is treated as page 1.
    pub fn normalized_page(&self) -> u64 {
        self.page.max(1)
    }

    /// Requested page size clamped to 1..=MAX_PAGE_SIZE.
    pub fn normalized_page_size(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of documents to skip for the requested page.
    pub fn skip(&self) -> u64 {
        (self.normalized_page() - 1) * self.normalized_page_size() as u64
    }

    /// The effective price range. Applies only when both bounds are present
    /// and non-zero; a bound of 0 means "unset".
    pub fn price_range(&self) -> Option<(i64, i64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > 0 && max > 0 => Some((min, max)),
            _ => None,
        }
    }

    /// The name filter, ignoring empty strings.
    pub fn name_query(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Listing response envelope: one page of products plus paging metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    /// The 1-based page that was returned
    pub page: u64,
    /// Total number of pages for this filter
    pub pages: u64,
    /// Total number of matching products
    pub total: u64,
}

impl ProductPage {
    pub fn new(products: Vec<ProductView>, page: u64, page_size: i64, total: u64) -> Self {
        let pages = total.div_ceil(page_size.max(1) as u64);
        Self {
            products,
            page,
            pages,
            total,
        }
    }
}

impl Product {
    /// Create a new product owned by the given seller
    pub fn new(input: CreateProduct, seller: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            image: input.image,
            price: input.price,
            count_in_stock: input.count_in_stock,
            seller,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(count_in_stock) = update.count_in_stock {
            self.count_in_stock = count_in_stock;
        }
        self.updated_at = Utc::now();
    }

    /// Check if product is in stock
    pub fn is_in_stock(&self) -> bool {
        self.count_in_stock > 0
    }

    /// Attach a resolved seller summary, producing the API projection.
    pub fn into_view(self, seller: Option<SellerSummary>) -> ProductView {
        ProductView {
            id: self.id,
            name: self.name,
            description: self.description,
            image: self.image,
            price: self.price,
            count_in_stock: self.count_in_stock,
            seller,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: "A test product".to_string(),
            image: "/images/p1.jpg".to_string(),
            price: 12000,
            count_in_stock: 3,
        }
    }

    #[test]
    fn test_new_product_sets_owner_and_timestamps() {
        let seller = Uuid::now_v7();
        let product = Product::new(create_input("Slim Fit Shirt"), seller);

        assert_eq!(product.seller, seller);
        assert_eq!(product.price, 12000);
        assert_eq!(product.created_at, product.updated_at);
        assert!(product.is_in_stock());
    }

    #[test]
    fn test_apply_update_is_partial() {
        let seller = Uuid::now_v7();
        let mut product = Product::new(create_input("Slim Fit Shirt"), seller);

        product.apply_update(UpdateProduct {
            price: Some(9900),
            count_in_stock: Some(0),
            ..Default::default()
        });

        assert_eq!(product.name, "Slim Fit Shirt");
        assert_eq!(product.price, 9900);
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_filter_price_range_requires_both_bounds() {
        let filter = ProductFilter {
            min: Some(1000),
            ..Default::default()
        };
        assert_eq!(filter.price_range(), None);

        let filter = ProductFilter {
            min: Some(1000),
            max: Some(5000),
            ..Default::default()
        };
        assert_eq!(filter.price_range(), Some((1000, 5000)));
    }

    #[test]
    fn test_filter_zero_bound_disables_price_range() {
        let filter = ProductFilter {
            min: Some(0),
            max: Some(5000),
            ..Default::default()
        };
        assert_eq!(filter.price_range(), None);
    }

    #[test]
    fn test_filter_skip_and_clamping() {
        let filter = ProductFilter {
            page: 3,
            page_size: 6,
            ..Default::default()
        };
        assert_eq!(filter.skip(), 12);

        let filter = ProductFilter {
            page: 0,
            page_size: 1000,
            ..Default::default()
        };
        assert_eq!(filter.normalized_page(), 1);
        assert_eq!(filter.normalized_page_size(), MAX_PAGE_SIZE);
        assert_eq!(filter.skip(), 0);
    }

    #[test]
    fn test_filter_name_query_ignores_empty() {
        let filter = ProductFilter {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.name_query(), None);

        let filter = ProductFilter {
            name: Some("shirt".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.name_query(), Some("shirt"));
    }

    #[test]
    fn test_view_serializes_missing_seller_as_null() {
        let product = Product::new(create_input("Orphaned Product"), Uuid::now_v7());
        let value = serde_json::to_value(product.into_view(None)).unwrap();
        assert!(value["seller"].is_null());
    }

    #[test]
    fn test_product_page_computes_page_count() {
        let page = ProductPage::new(Vec::new(), 1, 6, 13);
        assert_eq!(page.pages, 3);
        assert_eq!(page.total, 13);

        let page = ProductPage::new(Vec::new(), 1, 6, 0);
        assert_eq!(page.pages, 0);
    }

    #[test]
    fn test_order_parses_from_query_values() {
        assert_eq!("lowest".parse::<ProductOrder>().unwrap(), ProductOrder::Lowest);
        assert_eq!("highest".parse::<ProductOrder>().unwrap(), ProductOrder::Highest);
        assert_eq!(ProductOrder::default(), ProductOrder::Newest);
    }
}
