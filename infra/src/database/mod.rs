//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and migrations
//! - Repository implementations for every core repository trait
//! - A [`MySqlStorage`] bundle sharing one pool

pub mod connection;
pub mod mysql;
pub mod storage;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlCartItemRepository, MySqlCartRepository, MySqlMemberRepository, MySqlProductRepository,
    MySqlRoleRepository, MySqlTodoRepository,
};
pub use storage::MySqlStorage;
