//! Repository interfaces for data persistence.
//!
//! Each feature defines an async trait plus an in-memory implementation.
//! [`Storage`] bundles one implementation of every repository so callers
//! can pick a backend with a single type parameter.

pub mod cart;
pub mod member;
pub mod memory;
pub mod product;
pub mod role;
pub mod todo;

use std::cmp::Ordering;
use std::sync::Arc;

use mall_shared::Sort;

pub use cart::{CartItemRepository, CartRepository, InMemoryCartItemRepository, InMemoryCartRepository};
pub use member::{InMemoryMemberRepository, MemberFilter, MemberRepository};
pub use memory::InMemoryStorage;
pub use product::{InMemoryProductRepository, ProductFilter, ProductRepository};
pub use role::{InMemoryRoleRepository, RoleFilter, RoleRepository};
pub use todo::{InMemoryTodoRepository, TodoFilter, TodoRepository};

/// One repository of each kind, sharing a backend
pub trait Storage: Send + Sync + 'static {
    type Todos: TodoRepository + 'static;
    type Products: ProductRepository + 'static;
    type Members: MemberRepository + 'static;
    type Roles: RoleRepository + 'static;
    type Carts: CartRepository + 'static;
    type CartItems: CartItemRepository + 'static;

    fn todos(&self) -> Arc<Self::Todos>;
    fn products(&self) -> Arc<Self::Products>;
    fn members(&self) -> Arc<Self::Members>;
    fn roles(&self) -> Arc<Self::Roles>;
    fn carts(&self) -> Arc<Self::Carts>;
    fn cart_items(&self) -> Arc<Self::CartItems>;
}

/// Order records by every criterion in `sort`, earlier criteria first.
///
/// `compare` returns `Ordering::Equal` for fields it does not know. The sort
/// is stable, so records keep their incoming order on ties.
pub(crate) fn sort_records<T, F>(records: &mut [T], sort: &Sort, compare: F)
where
    F: Fn(&T, &T, &str) -> Ordering,
{
    if sort.is_unsorted() {
        return;
    }
    records.sort_by(|a, b| {
        for params in sort.iter() {
            let ordering = compare(a, b, &params.field);
            let ordering = if params.is_desc() { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Case-insensitive substring match
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
