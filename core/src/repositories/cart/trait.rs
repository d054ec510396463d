//! Cart repository traits defining the interface for cart persistence.

use async_trait::async_trait;

use crate::domain::entities::{Cart, CartItem};
use crate::errors::DomainError;

/// Repository trait for Cart entity persistence operations
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Persist a new cart
    ///
    /// # Returns
    /// * The stored cart with its generated `cno`
    async fn save(&self, cart: Cart) -> Result<Cart, DomainError>;

    /// Overwrite an existing cart
    async fn update(&self, cart: &Cart) -> Result<bool, DomainError>;

    async fn find_by_id(&self, cno: i64) -> Result<Option<Cart>, DomainError>;

    /// Find the cart owned by a member
    async fn find_by_owner(&self, email: &str) -> Result<Option<Cart>, DomainError>;
}

/// Repository trait for CartItem entity persistence operations
#[async_trait]
pub trait CartItemRepository: Send + Sync {
    /// Persist a new cart item
    ///
    /// # Returns
    /// * The stored item with its generated `cino`
    async fn save(&self, item: CartItem) -> Result<CartItem, DomainError>;

    /// Overwrite an existing cart item
    async fn update(&self, item: &CartItem) -> Result<bool, DomainError>;

    async fn find_by_id(&self, cino: i64) -> Result<Option<CartItem>, DomainError>;

    /// Items of a cart, oldest first
    async fn find_by_cart(&self, cno: i64) -> Result<Vec<CartItem>, DomainError>;

    /// The item holding `product_id` inside a cart, if any
    async fn find_by_cart_and_product(&self, cno: i64, product_id: i64) -> Result<Option<CartItem>, DomainError>;

    async fn delete_by_id(&self, cino: i64) -> Result<bool, DomainError>;

    /// Remove the listed items that belong to `cno`
    ///
    /// # Returns
    /// * Number of removed items
    async fn delete_by_ids(&self, cno: i64, cinos: &[i64]) -> Result<u64, DomainError>;

    /// Remove every item of a cart
    async fn delete_by_cart(&self, cno: i64) -> Result<u64, DomainError>;
}
