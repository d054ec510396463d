//! Mall domain crate.
//!
//! Holds the aggregates (member, role, product, cart, todo) with their audit
//! columns, the response DTOs built from them, the storage traits plus an
//! in-memory backend, and the services that enforce the business rules.
//! Everything fallible returns [`DomainError`], which carries a registry
//! code from `mall_shared`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
