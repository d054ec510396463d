//! Product repository trait defining the interface for product persistence.

use async_trait::async_trait;
use mall_shared::{Page, PageQuery};

use crate::domain::entities::Product;
use crate::errors::DomainError;
use crate::repositories::contains_ignore_case;

/// Criteria narrowing a product query; soft-deleted products are excluded unless asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name or description
    pub keyword: Option<String>,
    pub category: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<i64>,
    /// Inclusive upper price bound
    pub max_price: Option<i64>,
    pub include_deleted: bool,
}

impl ProductFilter {
    /// Every product that is not soft-deleted
    pub fn active() -> Self {
        Self::default()
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Default::default()
        }
    }

    pub fn price_range(min_price: Option<i64>, max_price: Option<i64>) -> Self {
        Self {
            min_price,
            max_price,
            ..Default::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        (self.include_deleted || !product.audit.deleted)
            && self.keyword.as_ref().map_or(true, |k| {
                contains_ignore_case(&product.product_name, k)
                    || product
                        .description
                        .as_ref()
                        .map_or(false, |d| contains_ignore_case(d, k))
            })
            && self.category.as_ref().map_or(true, |c| &product.category == c)
            && self.min_price.map_or(true, |min| product.price >= min)
            && self.max_price.map_or(true, |max| product.price <= max)
    }
}

/// Repository trait for Product entity persistence operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product together with its images
    ///
    /// # Returns
    /// * The stored product with its generated `id`
    async fn save(&self, product: Product) -> Result<Product, DomainError>;

    /// Overwrite an existing product, replacing its image list
    ///
    /// # Returns
    /// * `Ok(false)` if no product with that `id` exists
    async fn update(&self, product: &Product) -> Result<bool, DomainError>;

    /// Find a product by id, soft-deleted or not
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;

    /// Find every product whose id is listed, in no particular order
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, DomainError>;

    /// One page of products matching the filter, ordered by `query.sort`
    async fn find_page(&self, filter: &ProductFilter, query: &PageQuery) -> Result<Page<Product>, DomainError>;

    /// Count products matching the filter
    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError>;

    /// Mean price of products matching the filter
    ///
    /// # Returns
    /// * `Ok(None)` when nothing matches
    async fn average_price(&self, filter: &ProductFilter) -> Result<Option<f64>, DomainError>;
}
