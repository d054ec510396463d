//! In-memory implementation of MemberRepository

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::RwLock;

use mall_shared::{ErrorCode, Page, PageQuery};

use super::{MemberFilter, MemberRepository};
use crate::domain::entities::{Member, MemberRole};
use crate::errors::DomainError;
use crate::repositories::sort_records;

/// Member repository backed by a process-local map
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<BTreeMap<i64, Member>>>,
    next_id: AtomicI64,
}

impl InMemoryMemberRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            members: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryMemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_members(a: &Member, b: &Member, field: &str) -> Ordering {
    match field {
        "id" => a.id.cmp(&b.id),
        "email" => a.email.cmp(&b.email),
        "nickname" => a.nickname.cmp(&b.nickname),
        "createdAt" => a.audit.created_at.cmp(&b.audit.created_at),
        "updatedAt" => a.audit.updated_at.cmp(&b.audit.updated_at),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, mut member: Member) -> Result<Member, DomainError> {
        let mut members = self.members.write().await;

        // Unique email, as the table constraint would enforce
        if members.values().any(|m| m.email == member.email) {
            return Err(DomainError::custom(ErrorCode::UserEmailAlreadyExists)
                .with_details(member.email.clone()));
        }

        member.id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn update(&self, member: &Member) -> Result<bool, DomainError> {
        let mut members = self.members.write().await;
        match members.get_mut(&member.id) {
            Some(stored) => {
                *stored = member.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let members = self.members.read().await;
        Ok(members.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        let members = self.members.read().await;
        Ok(members.values().find(|m| m.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let members = self.members.read().await;
        Ok(members.values().any(|m| m.email == email))
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, DomainError> {
        let members = self.members.read().await;
        Ok(members.values().any(|m| m.nickname == nickname))
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|_, m| m.email != email);
        Ok(members.len() < before)
    }

    async fn find_page(&self, filter: &MemberFilter, query: &PageQuery) -> Result<Page<Member>, DomainError> {
        let members = self.members.read().await;
        let mut matched: Vec<Member> = members.values().filter(|m| filter.matches(m)).cloned().collect();
        sort_records(&mut matched, &query.sort, compare_members);
        Ok(query.paginate(matched))
    }

    async fn count(&self, filter: &MemberFilter) -> Result<u64, DomainError> {
        let members = self.members.read().await;
        Ok(members.values().filter(|m| filter.matches(m)).count() as u64)
    }

    async fn count_by_role(&self, role: MemberRole) -> Result<u64, DomainError> {
        let members = self.members.read().await;
        Ok(members.values().filter(|m| m.has_role(role)).count() as u64)
    }
}
