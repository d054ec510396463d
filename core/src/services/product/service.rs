//! Product service: catalogue management with soft deletion and price queries.

use std::sync::Arc;

use mall_shared::{ErrorCode, PageQuery, PageResponse, Sort, SortParams};

use crate::domain::entities::{AuditContext, AuditFields, Auditable, Product, DEFAULT_CATEGORY};
use crate::domain::value_objects::ProductResponse;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ProductFilter, ProductRepository};

/// Fields a product listing may be sorted by
pub const PRODUCT_SORT_FIELDS: &[&str] = &[
    "id",
    "productName",
    "price",
    "category",
    "stockQuantity",
    "status",
    "createdAt",
    "updatedAt",
];

pub fn default_product_sort() -> Sort {
    Sort::by(SortParams::desc("id"))
}

/// Configuration for the product service
#[derive(Debug, Clone)]
pub struct ProductServiceConfig {
    /// Category assigned when a product is created without one
    pub default_category: String,
}

impl Default for ProductServiceConfig {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Input for registering a product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProduct {
    pub product_name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub member_id: Option<i64>,
    pub images: Vec<String>,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProduct {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    /// Replaces the whole image list when present
    pub images: Option<Vec<String>>,
}

/// Combined search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// Service for managing the product catalogue
pub struct ProductService<R>
where
    R: ProductRepository,
{
    repository: Arc<R>,
    config: ProductServiceConfig,
}

impl<R> ProductService<R>
where
    R: ProductRepository + 'static,
{
    /// Create a new product service
    pub fn new(repository: Arc<R>, config: ProductServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Register a product
    ///
    /// # Errors
    /// * P004 when the price is negative
    pub async fn create(&self, ctx: &AuditContext, request: CreateProduct) -> DomainResult<ProductResponse> {
        let category = request
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.config.default_category.clone());
        let mut product = Product::new(request.product_name.trim(), 0, AuditFields::created(ctx))
            .with_description(request.description)
            .with_category(category)
            .with_stock(request.stock_quantity);
        product.change_price(request.price)?;
        product.image_url = request.image_url;
        product.member_id = request.member_id;
        product.replace_images(request.images);

        let saved = self.repository.save(product).await?;
        tracing::info!(id = saved.id, name = %saved.product_name, "Product created");
        Ok(ProductResponse::from(&saved))
    }

    /// Fetch one product that has not been deleted
    pub async fn get(&self, id: i64) -> DomainResult<ProductResponse> {
        Ok(ProductResponse::from(&self.find_active(id).await?))
    }

    /// Apply a partial update
    pub async fn update(&self, ctx: &AuditContext, id: i64, request: UpdateProduct) -> DomainResult<ProductResponse> {
        let mut product = self.find_active(id).await?;

        if let Some(name) = request.product_name.filter(|n| !n.trim().is_empty()) {
            product.change_name(name.trim());
        }
        if request.description.is_some() {
            product.change_description(request.description);
        }
        if let Some(price) = request.price {
            product.change_price(price)?;
        }
        if let Some(category) = request.category.filter(|c| !c.trim().is_empty()) {
            product.change_category(category);
        }
        if let Some(stock) = request.stock_quantity {
            let current = product.stock_quantity;
            if stock >= current {
                product.increase_stock(stock - current)?;
            } else {
                product.decrease_stock(current - stock)?;
            }
        }
        if request.image_url.is_some() {
            product.image_url = request.image_url;
        }
        if let Some(available) = request.is_available {
            product.change_availability(available);
        }
        if let Some(images) = request.images {
            product.replace_images(images);
        }

        product.touch(ctx);
        self.store(&product).await?;
        tracing::info!(id, "Product updated");
        Ok(ProductResponse::from(&product))
    }

    /// Soft-delete a product
    pub async fn delete(&self, ctx: &AuditContext, id: i64) -> DomainResult<()> {
        let mut product = self.find_active(id).await?;
        product.soft_delete(ctx);
        self.store(&product).await?;
        tracing::info!(id, "Product soft-deleted");
        Ok(())
    }

    /// Undo a soft delete; restoring an active product is a no-op
    pub async fn restore(&self, ctx: &AuditContext, id: i64) -> DomainResult<ProductResponse> {
        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        if product.is_deleted() {
            product.restore(ctx);
            self.store(&product).await?;
            tracing::info!(id, "Product restored");
        }
        Ok(ProductResponse::from(&product))
    }

    pub async fn list(&self, query: &PageQuery) -> DomainResult<PageResponse<ProductResponse>> {
        self.page(&ProductFilter::active(), query).await
    }

    /// Keyword search over name and description
    pub async fn search(&self, keyword: &str, query: &PageQuery) -> DomainResult<PageResponse<ProductResponse>> {
        self.page(&ProductFilter::keyword(keyword), query).await
    }

    /// Products whose price lies within the inclusive bounds
    ///
    /// # Errors
    /// * C001 when `min_price` exceeds `max_price`
    pub async fn list_by_price_range(
        &self,
        min_price: Option<i64>,
        max_price: Option<i64>,
        query: &PageQuery,
    ) -> DomainResult<PageResponse<ProductResponse>> {
        check_price_range(min_price, max_price)?;
        self.page(&ProductFilter::price_range(min_price, max_price), query).await
    }

    pub async fn search_by_conditions(
        &self,
        search: ProductSearch,
        query: &PageQuery,
    ) -> DomainResult<PageResponse<ProductResponse>> {
        check_price_range(search.min_price, search.max_price)?;
        let filter = ProductFilter {
            keyword: search.keyword.filter(|k| !k.trim().is_empty()),
            category: search.category.filter(|c| !c.trim().is_empty()),
            min_price: search.min_price,
            max_price: search.max_price,
            include_deleted: false,
        };
        self.page(&filter, query).await
    }

    pub async fn add_image(&self, ctx: &AuditContext, id: i64, file_name: &str) -> DomainResult<ProductResponse> {
        let mut product = self.find_active(id).await?;
        product.add_image(file_name);
        product.touch(ctx);
        self.store(&product).await?;
        Ok(ProductResponse::from(&product))
    }

    pub async fn clear_images(&self, ctx: &AuditContext, id: i64) -> DomainResult<ProductResponse> {
        let mut product = self.find_active(id).await?;
        product.clear_images();
        product.touch(ctx);
        self.store(&product).await?;
        Ok(ProductResponse::from(&product))
    }

    pub async fn change_price(&self, ctx: &AuditContext, id: i64, price: i64) -> DomainResult<ProductResponse> {
        let mut product = self.find_active(id).await?;
        product.change_price(price)?;
        product.touch(ctx);
        self.store(&product).await?;
        tracing::debug!(id, price, "Product price changed");
        Ok(ProductResponse::from(&product))
    }

    /// Number of products that are not deleted
    pub async fn active_count(&self) -> DomainResult<u64> {
        self.repository.count(&ProductFilter::active()).await
    }

    pub async fn count_by_price_range(&self, min_price: Option<i64>, max_price: Option<i64>) -> DomainResult<u64> {
        check_price_range(min_price, max_price)?;
        self.repository
            .count(&ProductFilter::price_range(min_price, max_price))
            .await
    }

    /// Mean price of active products, `None` when there are none
    pub async fn average_price(&self) -> DomainResult<Option<f64>> {
        self.repository.average_price(&ProductFilter::active()).await
    }

    pub async fn most_expensive(&self) -> DomainResult<Option<ProductResponse>> {
        self.first_by(SortParams::desc("price")).await
    }

    pub async fn cheapest(&self) -> DomainResult<Option<ProductResponse>> {
        self.first_by(SortParams::asc("price")).await
    }

    async fn first_by(&self, order: SortParams) -> DomainResult<Option<ProductResponse>> {
        let query = PageQuery::new(0, 1).with_sort(Sort::by(order));
        let page = self.repository.find_page(&ProductFilter::active(), &query).await?;
        Ok(page.content.first().map(ProductResponse::from))
    }

    async fn page(&self, filter: &ProductFilter, query: &PageQuery) -> DomainResult<PageResponse<ProductResponse>> {
        let page = self.repository.find_page(filter, query).await?;
        Ok(PageResponse::from_page(page, ProductResponse::from))
    }

    async fn find_active(&self, id: i64) -> DomainResult<Product> {
        match self.repository.find_by_id(id).await? {
            Some(product) if !product.is_deleted() => Ok(product),
            _ => Err(not_found(id)),
        }
    }

    async fn store(&self, product: &Product) -> DomainResult<()> {
        if self.repository.update(product).await? {
            Ok(())
        } else {
            Err(not_found(product.id))
        }
    }
}

fn check_price_range(min_price: Option<i64>, max_price: Option<i64>) -> DomainResult<()> {
    match (min_price, max_price) {
        (Some(min), Some(max)) if min > max => Err(DomainError::business(ErrorCode::InvalidInputValue)
            .with_details(format!("최소 가격({})이 최대 가격({})보다 큽니다", min, max))),
        _ => Ok(()),
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::business(ErrorCode::ProductNotFound)
        .with_details(format!("상품번호 {}에 해당하는 상품을 찾을 수 없습니다.", id))
}
