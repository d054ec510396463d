//! Role service: role catalogue with soft deletion and member counts.

use std::sync::Arc;

use mall_shared::{ErrorCode, PageQuery, PageResponse, Sort, SortParams};

use crate::domain::entities::{AuditContext, AuditFields, Auditable, Role, DEFAULT_ROLE_NAME};
use crate::domain::value_objects::RoleResponse;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{MemberRepository, RoleFilter, RoleRepository};

/// Fields a role listing may be sorted by
pub const ROLE_SORT_FIELDS: &[&str] = &["id", "roleName", "createdAt", "updatedAt"];

pub fn default_role_sort() -> Sort {
    Sort::by(SortParams::asc("id"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRole {
    pub role_name: String,
    pub description: Option<String>,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRole {
    pub role_name: Option<String>,
    pub description: Option<String>,
}

/// Service for managing roles
///
/// Member counts are read from the member repository, matching each role
/// to the member role of the same name.
pub struct RoleService<R, M>
where
    R: RoleRepository,
    M: MemberRepository,
{
    roles: Arc<R>,
    members: Arc<M>,
}

impl<R, M> RoleService<R, M>
where
    R: RoleRepository + 'static,
    M: MemberRepository + 'static,
{
    pub fn new(roles: Arc<R>, members: Arc<M>) -> Self {
        Self { roles, members }
    }

    /// Create a role
    ///
    /// # Errors
    /// * R002 when a role with that name exists, deleted or not
    pub async fn create(&self, ctx: &AuditContext, request: CreateRole) -> DomainResult<RoleResponse> {
        let role_name = request.role_name.trim().to_string();
        self.ensure_name_free(&role_name).await?;

        let role = Role::new(role_name, request.description, AuditFields::created(ctx));
        let saved = self.roles.save(role).await?;
        tracing::info!(id = saved.id, name = %saved.role_name, "Role created");
        self.respond(&saved).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<RoleResponse> {
        let role = self.find_active(id).await?;
        self.respond(&role).await
    }

    pub async fn get_by_name(&self, role_name: &str) -> DomainResult<RoleResponse> {
        match self.roles.find_by_name(role_name).await? {
            Some(role) if !role.is_deleted() => self.respond(&role).await,
            _ => Err(DomainError::business(ErrorCode::RoleNotFound)
                .with_details(format!("존재하지 않는 역할입니다: {}", role_name))),
        }
    }

    /// Rename or re-describe a role; deleted roles cannot be edited
    pub async fn update(&self, ctx: &AuditContext, id: i64, request: UpdateRole) -> DomainResult<RoleResponse> {
        let mut role = self.find_active(id).await?;

        if let Some(name) = request.role_name.map(|n| n.trim().to_string()) {
            if !name.is_empty() && name != role.role_name {
                self.ensure_name_free(&name).await?;
                role.change_name(name);
            }
        }
        if request.description.is_some() {
            role.change_description(request.description);
        }

        role.touch(ctx);
        self.store(&role).await?;
        tracing::info!(id, "Role updated");
        self.respond(&role).await
    }

    /// Soft-delete a role
    ///
    /// # Errors
    /// * R003 for the default role
    pub async fn delete(&self, ctx: &AuditContext, id: i64) -> DomainResult<()> {
        let mut role = self.find_any(id).await?;
        if role.is_default() {
            return Err(DomainError::business(ErrorCode::RoleInUse)
                .with_details(format!("기본 역할은 삭제할 수 없습니다: {}", role.role_name)));
        }
        role.soft_delete(ctx);
        self.store(&role).await?;
        tracing::info!(id, "Role soft-deleted");
        Ok(())
    }

    pub async fn restore(&self, ctx: &AuditContext, id: i64) -> DomainResult<RoleResponse> {
        let mut role = self.find_any(id).await?;
        if role.is_deleted() {
            role.restore(ctx);
            self.store(&role).await?;
            tracing::info!(id, "Role restored");
        }
        self.respond(&role).await
    }

    /// Page of roles that are not deleted
    pub async fn list(&self, query: &PageQuery) -> DomainResult<PageResponse<RoleResponse>> {
        self.page(&RoleFilter::active(), query).await
    }

    pub async fn list_active(&self) -> DomainResult<Vec<RoleResponse>> {
        let roles = self.roles.find_list(&RoleFilter::active(), &default_role_sort()).await?;
        let mut responses = Vec::with_capacity(roles.len());
        for role in &roles {
            responses.push(self.respond(role).await?);
        }
        Ok(responses)
    }

    /// Case-insensitive search over name and description
    pub async fn search(&self, keyword: &str, query: &PageQuery) -> DomainResult<PageResponse<RoleResponse>> {
        self.page(&RoleFilter::keyword(keyword), query).await
    }

    pub async fn exists_by_name(&self, role_name: &str) -> DomainResult<bool> {
        self.roles.exists_by_name(role_name).await
    }

    pub async fn is_default(&self, id: i64) -> DomainResult<bool> {
        Ok(self.find_any(id).await?.is_default())
    }

    /// Validate that a role may serve as the default.
    ///
    /// The default role is fixed by name, so this only checks the role
    /// exists and is not deleted.
    pub async fn set_default(&self, id: i64) -> DomainResult<()> {
        let role = self.find_any(id).await?;
        if role.is_deleted() {
            return Err(DomainError::business(ErrorCode::RoleNotFound)
                .with_details(format!("삭제된 역할은 기본 역할로 설정할 수 없습니다: {}", id)));
        }
        tracing::info!(id, "Role set as default");
        Ok(())
    }

    pub async fn unset_default(&self, id: i64) -> DomainResult<()> {
        self.find_any(id).await?;
        tracing::info!(id, "Role unset as default");
        Ok(())
    }

    /// The active default role, if one exists
    pub async fn get_default(&self) -> DomainResult<Option<RoleResponse>> {
        match self.roles.find_by_name(DEFAULT_ROLE_NAME).await? {
            Some(role) if !role.is_deleted() => Ok(Some(self.respond(&role).await?)),
            _ => Ok(None),
        }
    }

    /// Members holding the member role matching this role
    pub async fn member_count(&self, id: i64) -> DomainResult<u64> {
        let role = self.find_any(id).await?;
        self.count_members(&role).await
    }

    pub async fn active_count(&self) -> DomainResult<u64> {
        Ok(self.roles.find_list(&RoleFilter::active(), &Sort::unsorted()).await?.len() as u64)
    }

    async fn count_members(&self, role: &Role) -> DomainResult<u64> {
        match role.member_role() {
            Some(member_role) => self.members.count_by_role(member_role).await,
            None => Ok(0),
        }
    }

    async fn respond(&self, role: &Role) -> DomainResult<RoleResponse> {
        let count = self.count_members(role).await?;
        Ok(RoleResponse::new(role, count))
    }

    async fn page(&self, filter: &RoleFilter, query: &PageQuery) -> DomainResult<PageResponse<RoleResponse>> {
        let page = self.roles.find_page(filter, query).await?;
        let mut content = Vec::with_capacity(page.content.len());
        for role in &page.content {
            content.push(self.respond(role).await?);
        }
        Ok(PageResponse::of_sorted(
            content,
            page.page,
            page.size,
            page.total_elements,
            page.sort.to_string(),
        ))
    }

    async fn ensure_name_free(&self, role_name: &str) -> DomainResult<()> {
        if self.roles.exists_by_name(role_name).await? {
            return Err(DomainError::business(ErrorCode::RoleAlreadyExists)
                .with_details(format!("이미 존재하는 역할명입니다: {}", role_name)));
        }
        Ok(())
    }

    async fn find_any(&self, id: i64) -> DomainResult<Role> {
        self.roles.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    async fn find_active(&self, id: i64) -> DomainResult<Role> {
        let role = self.find_any(id).await?;
        if role.is_deleted() {
            return Err(DomainError::business(ErrorCode::RoleNotFound)
                .with_details(format!("삭제된 역할입니다: {}", id)));
        }
        Ok(role)
    }

    async fn store(&self, role: &Role) -> DomainResult<()> {
        if self.roles.update(role).await? {
            Ok(())
        } else {
            Err(not_found(role.id))
        }
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::business(ErrorCode::RoleNotFound).with_details(format!("존재하지 않는 역할입니다: {}", id))
}
