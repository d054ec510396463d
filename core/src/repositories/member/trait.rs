//! Member repository trait defining the interface for member persistence.

use async_trait::async_trait;
use mall_shared::{Page, PageQuery};

use crate::domain::entities::{Member, MemberRole};
use crate::errors::DomainError;
use crate::repositories::contains_ignore_case;

/// Criteria narrowing a member query; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    /// Case-insensitive substring of the nickname or email
    pub keyword: Option<String>,
    pub social: Option<bool>,
}

impl MemberFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, member: &Member) -> bool {
        self.keyword.as_ref().map_or(true, |k| {
            contains_ignore_case(&member.nickname, k) || contains_ignore_case(&member.email, k)
        }) && self.social.map_or(true, |s| member.social == s)
    }
}

/// Repository trait for Member entity persistence operations
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist a new member with its roles
    ///
    /// # Returns
    /// * The stored member with its generated `id`
    async fn save(&self, member: Member) -> Result<Member, DomainError>;

    /// Overwrite an existing member, replacing its roles
    ///
    /// # Returns
    /// * `Ok(false)` if no member with that `id` exists
    async fn update(&self, member: &Member) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError>;

    /// Find a member by email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, DomainError>;

    /// Remove a member permanently
    ///
    /// # Returns
    /// * `Ok(true)` if a member was removed
    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// One page of members matching the filter, ordered by `query.sort`
    async fn find_page(&self, filter: &MemberFilter, query: &PageQuery) -> Result<Page<Member>, DomainError>;

    async fn count(&self, filter: &MemberFilter) -> Result<u64, DomainError>;

    /// Number of members holding `role`
    async fn count_by_role(&self, role: MemberRole) -> Result<u64, DomainError>;
}
