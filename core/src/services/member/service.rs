//! Member service: registration, profile changes, passwords and role grants.

use std::sync::Arc;

use mall_shared::{ErrorCode, PageQuery, PageResponse, Sort, SortParams};

use crate::domain::entities::{AuditContext, AuditFields, Auditable, Member, MemberRole};
use crate::domain::value_objects::MemberResponse;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{MemberFilter, MemberRepository};
use crate::services::PasswordEncoder;

/// Fields a member listing may be sorted by
pub const MEMBER_SORT_FIELDS: &[&str] = &["id", "email", "nickname", "createdAt", "updatedAt"];

pub fn default_member_sort() -> Sort {
    Sort::by(SortParams::desc("id"))
}

/// Configuration for the member service
#[derive(Debug, Clone, Default)]
pub struct MemberServiceConfig {
    /// Roles granted on registration besides `USER`
    pub extra_default_roles: Vec<MemberRole>,
}

/// Input for registering a member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMember {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub picture_url: Option<String>,
    pub social: bool,
}

/// Partial profile update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMember {
    pub nickname: Option<String>,
    pub picture_url: Option<String>,
    pub social: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

/// Service for managing member accounts
pub struct MemberService<R>
where
    R: MemberRepository,
{
    repository: Arc<R>,
    encoder: Arc<dyn PasswordEncoder>,
    config: MemberServiceConfig,
}

impl<R> MemberService<R>
where
    R: MemberRepository + 'static,
{
    /// Create a new member service
    ///
    /// # Arguments
    /// * `repository` - Member persistence
    /// * `encoder` - Password hasher used for registration and password changes
    /// * `config` - Service configuration
    pub fn new(repository: Arc<R>, encoder: Arc<dyn PasswordEncoder>, config: MemberServiceConfig) -> Self {
        Self {
            repository,
            encoder,
            config,
        }
    }

    /// Register a member with a hashed password
    ///
    /// # Errors
    /// * U004 when the email is taken
    /// * M002 when the nickname is taken
    pub async fn create(&self, ctx: &AuditContext, request: CreateMember) -> DomainResult<MemberResponse> {
        let email = request.email.trim().to_string();
        let nickname = request.nickname.trim().to_string();

        if self.repository.exists_by_email(&email).await? {
            return Err(DomainError::business(ErrorCode::UserEmailAlreadyExists).with_details(email));
        }
        self.ensure_nickname_free(&nickname).await?;

        let hash = self.encoder.encode(&request.password)?;
        let mut member = Member::new(email, nickname, Some(hash), AuditFields::created(ctx));
        member.picture_url = request.picture_url;
        member.change_social(request.social);
        for role in &self.config.extra_default_roles {
            member.add_role(*role);
        }

        let saved = self.repository.save(member).await?;
        tracing::info!(id = saved.id, email = %saved.email, "Member registered");
        Ok(MemberResponse::from(&saved))
    }

    pub async fn get(&self, email: &str) -> DomainResult<MemberResponse> {
        Ok(MemberResponse::from(&self.find_existing(email).await?))
    }

    /// Update profile fields
    ///
    /// # Errors
    /// * M002 when the new nickname belongs to another member
    pub async fn update(&self, ctx: &AuditContext, email: &str, request: UpdateMember) -> DomainResult<MemberResponse> {
        let mut member = self.find_existing(email).await?;

        let nickname = match request.nickname.map(|n| n.trim().to_string()) {
            Some(n) if !n.is_empty() && n != member.nickname => {
                self.ensure_nickname_free(&n).await?;
                n
            }
            _ => member.nickname.clone(),
        };
        let picture_url = request.picture_url.or_else(|| member.picture_url.clone());
        member.update_member_info(nickname, picture_url);
        if let Some(social) = request.social {
            member.change_social(social);
        }
        match request.is_active {
            Some(true) => member.activate(),
            Some(false) => member.deactivate(),
            None => {}
        }

        member.touch(ctx);
        self.store(&member).await?;
        tracing::info!(email, "Member updated");
        Ok(MemberResponse::from(&member))
    }

    /// Remove a member permanently
    pub async fn delete(&self, email: &str) -> DomainResult<()> {
        if !self.repository.delete_by_email(email).await? {
            return Err(not_found(email));
        }
        tracing::info!(email, "Member deleted");
        Ok(())
    }

    pub async fn list(&self, query: &PageQuery) -> DomainResult<PageResponse<MemberResponse>> {
        self.page(&MemberFilter::all(), query).await
    }

    /// Keyword search over nickname and email
    pub async fn search(&self, keyword: &str, query: &PageQuery) -> DomainResult<PageResponse<MemberResponse>> {
        self.page(&MemberFilter::keyword(keyword), query).await
    }

    /// Replace the password after verifying the current one
    ///
    /// # Errors
    /// * U005 when the current password does not match
    pub async fn change_password(&self, ctx: &AuditContext, email: &str, request: ChangePassword) -> DomainResult<()> {
        let mut member = self.find_existing(email).await?;

        let matches = match member.password.as_deref() {
            Some(hash) => self.encoder.matches(&request.current_password, hash)?,
            None => false,
        };
        if !matches {
            tracing::warn!(email, "Password change rejected");
            return Err(DomainError::business(ErrorCode::UserPasswordMismatch));
        }

        member.change_password(self.encoder.encode(&request.new_password)?);
        member.touch(ctx);
        self.store(&member).await?;
        tracing::info!(email, "Password changed");
        Ok(())
    }

    /// Grant a role by name (`ADMIN` or `ROLE_ADMIN`)
    ///
    /// # Errors
    /// * M004 when the role name is unknown
    /// * M005 when the member already holds the role
    pub async fn add_role(&self, ctx: &AuditContext, email: &str, role: &str) -> DomainResult<MemberResponse> {
        let role = parse_role(role)?;
        let mut member = self.find_existing(email).await?;
        if !member.add_role(role) {
            return Err(DomainError::business(ErrorCode::MemberRoleAlreadyExists)
                .with_details(format!("{} 역할을 이미 보유하고 있습니다", role)));
        }
        member.touch(ctx);
        self.store(&member).await?;
        tracing::info!(email, %role, "Role granted");
        Ok(MemberResponse::from(&member))
    }

    /// Revoke a role by name
    ///
    /// # Errors
    /// * M004 when the role name is unknown or not held
    pub async fn remove_role(&self, ctx: &AuditContext, email: &str, role: &str) -> DomainResult<MemberResponse> {
        let role = parse_role(role)?;
        let mut member = self.find_existing(email).await?;
        if !member.remove_role(role) {
            return Err(DomainError::business(ErrorCode::MemberRoleNotFound)
                .with_details(format!("{} 역할을 보유하고 있지 않습니다", role)));
        }
        member.touch(ctx);
        self.store(&member).await?;
        tracing::info!(email, %role, "Role revoked");
        Ok(MemberResponse::from(&member))
    }

    pub async fn exists(&self, email: &str) -> DomainResult<bool> {
        self.repository.exists_by_email(email).await
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.repository.count(&MemberFilter::all()).await
    }

    pub async fn count_by_role(&self, role: MemberRole) -> DomainResult<u64> {
        self.repository.count_by_role(role).await
    }

    async fn ensure_nickname_free(&self, nickname: &str) -> DomainResult<()> {
        if self.repository.exists_by_nickname(nickname).await? {
            return Err(DomainError::business(ErrorCode::MemberAlreadyExists)
                .with_details(format!("이미 사용 중인 닉네임입니다: {}", nickname)));
        }
        Ok(())
    }

    async fn page(&self, filter: &MemberFilter, query: &PageQuery) -> DomainResult<PageResponse<MemberResponse>> {
        let page = self.repository.find_page(filter, query).await?;
        Ok(PageResponse::from_page(page, MemberResponse::from))
    }

    async fn find_existing(&self, email: &str) -> DomainResult<Member> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| not_found(email))
    }

    async fn store(&self, member: &Member) -> DomainResult<()> {
        if self.repository.update(member).await? {
            Ok(())
        } else {
            Err(not_found(&member.email))
        }
    }
}

fn parse_role(role: &str) -> DomainResult<MemberRole> {
    role.parse()
        .map_err(|e: String| DomainError::business(ErrorCode::MemberRoleNotFound).with_details(e))
}

fn not_found(email: &str) -> DomainError {
    DomainError::business(ErrorCode::MemberNotFound)
        .with_details(format!("이메일 {}에 해당하는 회원을 찾을 수 없습니다.", email))
}
