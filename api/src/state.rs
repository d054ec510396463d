//! Shared application state handed to every handler

use std::sync::Arc;

use mall_core::repositories::Storage;
use mall_core::services::{
    CartService, MemberService, MemberServiceConfig, PasswordEncoder, ProductService, ProductServiceConfig,
    RoleService, TodoService, TodoServiceConfig,
};
use mall_shared::CorsConfig;

use crate::routes::sample::SampleIdGenerator;

const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;

/// Application state that holds the services of every feature
pub struct AppState<S: Storage> {
    pub todo_service: Arc<TodoService<S::Todos>>,
    pub product_service: Arc<ProductService<S::Products>>,
    pub member_service: Arc<MemberService<S::Members>>,
    pub role_service: Arc<RoleService<S::Roles, S::Members>>,
    pub cart_service: Arc<CartService<S::Carts, S::CartItems, S::Members, S::Products>>,
    pub sample_ids: SampleIdGenerator,
    pub cors: CorsConfig,
    /// Largest accepted JSON body in bytes
    pub json_limit: usize,
}

impl<S: Storage> AppState<S> {
    /// Wire every service over one storage backend with default service settings
    pub fn new(storage: &S, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self {
            todo_service: Arc::new(TodoService::new(storage.todos(), TodoServiceConfig::default())),
            product_service: Arc::new(ProductService::new(storage.products(), ProductServiceConfig::default())),
            member_service: Arc::new(MemberService::new(
                storage.members(),
                encoder,
                MemberServiceConfig::default(),
            )),
            role_service: Arc::new(RoleService::new(storage.roles(), storage.members())),
            cart_service: Arc::new(CartService::new(
                storage.carts(),
                storage.cart_items(),
                storage.members(),
                storage.products(),
            )),
            sample_ids: SampleIdGenerator::default(),
            cors: CorsConfig::default(),
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }

    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }

    pub fn with_json_limit(mut self, limit: usize) -> Self {
        self.json_limit = limit;
        self
    }
}
