//! Cart and cart item repository module.

mod r#trait;
pub use r#trait::{CartItemRepository, CartRepository};

mod memory;
pub use memory::{InMemoryCartItemRepository, InMemoryCartRepository};
