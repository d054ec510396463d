//! In-memory implementation of RoleRepository

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::RwLock;

use mall_shared::{ErrorCode, Page, PageQuery, Sort};

use super::{RoleFilter, RoleRepository};
use crate::domain::entities::Role;
use crate::errors::DomainError;
use crate::repositories::sort_records;

/// Role repository backed by a process-local map
pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<BTreeMap<i64, Role>>>,
    next_id: AtomicI64,
}

impl InMemoryRoleRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            roles: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    async fn matching(&self, filter: &RoleFilter, sort: &Sort) -> Vec<Role> {
        let roles = self.roles.read().await;
        let mut matched: Vec<Role> = roles.values().filter(|r| filter.matches(r)).cloned().collect();
        sort_records(&mut matched, sort, compare_roles);
        matched
    }
}

impl Default for InMemoryRoleRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_roles(a: &Role, b: &Role, field: &str) -> Ordering {
    match field {
        "id" => a.id.cmp(&b.id),
        "roleName" => a.role_name.cmp(&b.role_name),
        "createdAt" => a.audit.created_at.cmp(&b.audit.created_at),
        "updatedAt" => a.audit.updated_at.cmp(&b.audit.updated_at),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn save(&self, mut role: Role) -> Result<Role, DomainError> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|r| r.role_name == role.role_name) {
            return Err(DomainError::custom(ErrorCode::RoleAlreadyExists).with_details(role.role_name.clone()));
        }
        role.id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, role: &Role) -> Result<bool, DomainError> {
        let mut roles = self.roles.write().await;
        match roles.get_mut(&role.id) {
            Some(stored) => {
                *stored = role.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.get(&id).cloned())
    }

    async fn find_by_name(&self, role_name: &str) -> Result<Option<Role>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|r| r.role_name == role_name).cloned())
    }

    async fn exists_by_name(&self, role_name: &str) -> Result<bool, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.values().any(|r| r.role_name == role_name))
    }

    async fn find_page(&self, filter: &RoleFilter, query: &PageQuery) -> Result<Page<Role>, DomainError> {
        Ok(query.paginate(self.matching(filter, &query.sort).await))
    }

    async fn find_list(&self, filter: &RoleFilter, sort: &Sort) -> Result<Vec<Role>, DomainError> {
        Ok(self.matching(filter, sort).await)
    }
}
