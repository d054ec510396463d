//! MySQL-backed [`Storage`] bundle.

use std::sync::Arc;

use mall_core::repositories::Storage;

use super::connection::DatabasePool;
use super::mysql::{
    MySqlCartItemRepository, MySqlCartRepository, MySqlMemberRepository, MySqlProductRepository,
    MySqlRoleRepository, MySqlTodoRepository,
};

/// Every repository, sharing one connection pool
#[derive(Clone)]
pub struct MySqlStorage {
    todos: Arc<MySqlTodoRepository>,
    products: Arc<MySqlProductRepository>,
    members: Arc<MySqlMemberRepository>,
    roles: Arc<MySqlRoleRepository>,
    carts: Arc<MySqlCartRepository>,
    cart_items: Arc<MySqlCartItemRepository>,
}

impl MySqlStorage {
    pub fn new(database: &DatabasePool) -> Self {
        let pool = database.get_pool();
        Self {
            todos: Arc::new(MySqlTodoRepository::new(pool.clone())),
            products: Arc::new(MySqlProductRepository::new(pool.clone())),
            members: Arc::new(MySqlMemberRepository::new(pool.clone())),
            roles: Arc::new(MySqlRoleRepository::new(pool.clone())),
            carts: Arc::new(MySqlCartRepository::new(pool.clone())),
            cart_items: Arc::new(MySqlCartItemRepository::new(pool.clone())),
        }
    }
}

impl Storage for MySqlStorage {
    type Todos = MySqlTodoRepository;
    type Products = MySqlProductRepository;
    type Members = MySqlMemberRepository;
    type Roles = MySqlRoleRepository;
    type Carts = MySqlCartRepository;
    type CartItems = MySqlCartItemRepository;

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
