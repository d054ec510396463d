//! In-memory implementations of CartRepository and CartItemRepository

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CartItemRepository, CartRepository};
use crate::domain::entities::{Cart, CartItem};
use crate::errors::DomainError;

/// Cart repository backed by a process-local map
pub struct InMemoryCartRepository {
    carts: Arc<RwLock<BTreeMap<i64, Cart>>>,
    next_id: AtomicI64,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self {
            carts: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCartRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn save(&self, mut cart: Cart) -> Result<Cart, DomainError> {
        cart.cno = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut carts = self.carts.write().await;
        carts.insert(cart.cno, cart.clone());
        Ok(cart)
    }

    async fn update(&self, cart: &Cart) -> Result<bool, DomainError> {
        let mut carts = self.carts.write().await;
        match carts.get_mut(&cart.cno) {
            Some(stored) => {
                *stored = cart.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, cno: i64) -> Result<Option<Cart>, DomainError> {
        let carts = self.carts.read().await;
        Ok(carts.get(&cno).cloned())
    }

    async fn find_by_owner(&self, email: &str) -> Result<Option<Cart>, DomainError> {
        let carts = self.carts.read().await;
        Ok(carts.values().find(|c| c.is_owned_by(email)).cloned())
    }
}

/// Cart item repository backed by a process-local map
pub struct InMemoryCartItemRepository {
    items: Arc<RwLock<BTreeMap<i64, CartItem>>>,
    next_id: AtomicI64,
}

impl InMemoryCartItemRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCartItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartItemRepository for InMemoryCartItemRepository {
    async fn save(&self, mut item: CartItem) -> Result<CartItem, DomainError> {
        item.cino = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.write().await;
        items.insert(item.cino, item.clone());
        Ok(item)
    }

    async fn update(&self, item: &CartItem) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.cino) {
            Some(stored) => {
                *stored = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, cino: i64) -> Result<Option<CartItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items.get(&cino).cloned())
    }

    async fn find_by_cart(&self, cno: i64) -> Result<Vec<CartItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items.values().filter(|i| i.cno == cno).cloned().collect())
    }

    async fn find_by_cart_and_product(&self, cno: i64, product_id: i64) -> Result<Option<CartItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .find(|i| i.cno == cno && i.product_id == product_id)
            .cloned())
    }

    async fn delete_by_id(&self, cino: i64) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        Ok(items.remove(&cino).is_some())
    }

    async fn delete_by_ids(&self, cno: i64, cinos: &[i64]) -> Result<u64, DomainError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|cino, item| !(item.cno == cno && cinos.contains(cino)));
        Ok((before - items.len()) as u64)
    }

    async fn delete_by_cart(&self, cno: i64) -> Result<u64, DomainError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|_, item| item.cno != cno);
        Ok((before - items.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuditFields;

    #[tokio::test]
    async fn test_find_by_owner() {
        let repo = InMemoryCartRepository::new();
        let cart = repo.save(Cart::new("a@example.com", AuditFields::default())).await.unwrap();
        assert_eq!(repo.find_by_owner("a@example.com").await.unwrap().unwrap().cno, cart.cno);
        assert!(repo.find_by_owner("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_batch_delete_only_touches_own_cart() {
        let repo = InMemoryCartItemRepository::new();
        let mine = repo.save(CartItem::new(1, 10, 1, AuditFields::default())).await.unwrap();
        let other = repo.save(CartItem::new(2, 10, 1, AuditFields::default())).await.unwrap();

        let removed = repo.delete_by_ids(1, &[mine.cino, other.cino]).await.unwrap();
        assert_eq!(removed, 1);
        assert!(repo.find_by_id(other.cino).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_by_cart_and_product() {
        let repo = InMemoryCartItemRepository::new();
        repo.save(CartItem::new(1, 10, 1, AuditFields::default())).await.unwrap();
        repo.save(CartItem::new(1, 11, 4, AuditFields::default())).await.unwrap();

        let item = repo.find_by_cart_and_product(1, 11).await.unwrap().unwrap();
        assert_eq!(item.qty, 4);
        assert_eq!(repo.delete_by_cart(1).await.unwrap(), 2);
        assert!(repo.find_by_cart(1).await.unwrap().is_empty());
    }
}
