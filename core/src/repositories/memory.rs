//! In-memory storage backend

use std::sync::Arc;

use super::{
    InMemoryCartItemRepository, InMemoryCartRepository, InMemoryMemberRepository,
    InMemoryProductRepository, InMemoryRoleRepository, InMemoryTodoRepository, Storage,
};

/// Every repository kept in process memory; contents are lost on restart
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    todos: Arc<InMemoryTodoRepository>,
    products: Arc<InMemoryProductRepository>,
    members: Arc<InMemoryMemberRepository>,
    roles: Arc<InMemoryRoleRepository>,
    carts: Arc<InMemoryCartRepository>,
    cart_items: Arc<InMemoryCartItemRepository>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for InMemoryStorage {
    type Todos = InMemoryTodoRepository;
    type Products = InMemoryProductRepository;
    type Members = InMemoryMemberRepository;
    type Roles = InMemoryRoleRepository;
    type Carts = InMemoryCartRepository;
    type CartItems = InMemoryCartItemRepository;

    fn todos(&self) -> Arc<Self::Todos> {
        Arc::clone(&self.todos)
    }

    fn products(&self) -> Arc<Self::Products> {
        Arc::clone(&self.products)
    }

    fn members(&self) -> Arc<Self::Members> {
        Arc::clone(&self.members)
    }

    fn roles(&self) -> Arc<Self::Roles> {
        Arc::clone(&self.roles)
    }

    fn carts(&self) -> Arc<Self::Carts> {
        Arc::clone(&self.carts)
    }

    fn cart_items(&self) -> Arc<Self::CartItems> {
        Arc::clone(&self.cart_items)
    }
}
