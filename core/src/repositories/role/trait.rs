//! Role repository trait defining the interface for role persistence.

use async_trait::async_trait;
use mall_shared::{Page, PageQuery, Sort};

use crate::domain::entities::Role;
use crate::errors::DomainError;
use crate::repositories::contains_ignore_case;

/// Criteria narrowing a role query; soft-deleted roles are excluded unless asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleFilter {
    /// Case-insensitive substring of the name or description
    pub keyword: Option<String>,
    pub include_deleted: bool,
}

impl RoleFilter {
    pub fn active() -> Self {
        Self::default()
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            include_deleted: false,
        }
    }

    pub fn matches(&self, role: &Role) -> bool {
        (self.include_deleted || !role.audit.deleted)
            && self.keyword.as_ref().map_or(true, |k| {
                contains_ignore_case(&role.role_name, k)
                    || role
                        .description
                        .as_ref()
                        .map_or(false, |d| contains_ignore_case(d, k))
            })
    }
}

/// Repository trait for Role entity persistence operations
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Persist a new role
    ///
    /// # Returns
    /// * The stored role with its generated `id`
    async fn save(&self, role: Role) -> Result<Role, DomainError>;

    /// Overwrite an existing role
    ///
    /// # Returns
    /// * `Ok(false)` if no role with that `id` exists
    async fn update(&self, role: &Role) -> Result<bool, DomainError>;

    /// Find a role by id, soft-deleted or not
    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, DomainError>;

    /// Find a role by its exact name, soft-deleted or not
    async fn find_by_name(&self, role_name: &str) -> Result<Option<Role>, DomainError>;

    async fn exists_by_name(&self, role_name: &str) -> Result<bool, DomainError>;

    /// One page of roles matching the filter, ordered by `query.sort`
    async fn find_page(&self, filter: &RoleFilter, query: &PageQuery) -> Result<Page<Role>, DomainError>;

    /// Every role matching the filter, ordered by `sort`
    async fn find_list(&self, filter: &RoleFilter, sort: &Sort) -> Result<Vec<Role>, DomainError>;
}
