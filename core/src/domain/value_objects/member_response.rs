use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::audit_dto::{map_audit, AuditDto};
use crate::domain::entities::Member;

/// Member as exposed over the API. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub picture_url: Option<String>,
    pub provider: Option<String>,
    pub social: bool,
    pub is_active: bool,
    pub roles: BTreeSet<String>,
    #[serde(flatten)]
    pub audit: AuditDto,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            email: member.email.clone(),
            nickname: member.nickname.clone(),
            picture_url: member.picture_url.clone(),
            provider: member.provider.clone(),
            social: member.social,
            is_active: member.is_active,
            roles: member.role_names(),
            audit: map_audit(member),
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}
