//! In-memory implementation of ProductRepository

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::RwLock;

use mall_shared::{Page, PageQuery};

use super::{ProductFilter, ProductRepository};
use crate::domain::entities::Product;
use crate::errors::DomainError;
use crate::repositories::sort_records;

/// Product repository backed by a process-local map
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_products(a: &Product, b: &Product, field: &str) -> Ordering {
    match field {
        "id" => a.id.cmp(&b.id),
        "productName" => a.product_name.cmp(&b.product_name),
        "price" => a.price.cmp(&b.price),
        "category" => a.category.cmp(&b.category),
        "stockQuantity" => a.stock_quantity.cmp(&b.stock_quantity),
        "status" => a.status.as_str().cmp(b.status.as_str()),
        "createdAt" => a.audit.created_at.cmp(&b.audit.created_at),
        "updatedAt" => a.audit.updated_at.cmp(&b.audit.updated_at),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, mut product: Product) -> Result<Product, DomainError> {
        product.id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<bool, DomainError> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn find_page(&self, filter: &ProductFilter, query: &PageQuery) -> Result<Page<Product>, DomainError> {
        let products = self.products.read().await;
        let mut matched: Vec<Product> = products.values().filter(|p| filter.matches(p)).cloned().collect();
        sort_records(&mut matched, &query.sort, compare_products);
        Ok(query.paginate(matched))
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn average_price(&self, filter: &ProductFilter) -> Result<Option<f64>, DomainError> {
        let products = self.products.read().await;
        let prices: Vec<i64> = products
            .values()
            .filter(|p| filter.matches(p))
            .map(|p| p.price)
            .collect();
        if prices.is_empty() {
            return Ok(None);
        }
        Ok(Some(prices.iter().sum::<i64>() as f64 / prices.len() as f64))
    }
}
