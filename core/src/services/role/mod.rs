//! Role catalogue service module.

mod service;

pub use service::{default_role_sort, CreateRole, RoleService, UpdateRole, ROLE_SORT_FIELDS};

#[cfg(test)]
mod tests;
