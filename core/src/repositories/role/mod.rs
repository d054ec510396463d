//! Role repository module.

mod r#trait;
pub use r#trait::{RoleFilter, RoleRepository};

mod memory;
pub use memory::InMemoryRoleRepository;
