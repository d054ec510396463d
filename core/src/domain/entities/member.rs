//! Member entity representing a registered account.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::audit::{AuditFields, Auditable};

/// Roles a member can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    User,
    Manager,
    Admin,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::User => "USER",
            MemberRole::Manager => "MANAGER",
            MemberRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = String;

    /// Accepts `ADMIN`, `admin` and `ROLE_ADMIN`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "USER" => Ok(MemberRole::User),
            "MANAGER" => Ok(MemberRole::Manager),
            "ADMIN" => Ok(MemberRole::Admin),
            _ => Err(format!("Invalid member role: {}", s)),
        }
    }
}

/// A registered member. Email and nickname are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Identifier, 0 until the record is first saved
    pub id: i64,
    pub email: String,
    pub nickname: String,
    /// Password hash; `None` for social accounts
    pub password: Option<String>,
    pub picture_url: Option<String>,
    pub provider: Option<String>,
    pub provider_id: Option<String>,
    pub social: bool,
    pub is_active: bool,
    pub roles: BTreeSet<MemberRole>,
    pub audit: AuditFields,
}

impl Member {
    /// A local (non-social) account holding the `USER` role
    pub fn new(
        email: impl Into<String>,
        nickname: impl Into<String>,
        password_hash: Option<String>,
        audit: AuditFields,
    ) -> Self {
        Self {
            id: 0,
            email: email.into(),
            nickname: nickname.into(),
            password: password_hash,
            picture_url: None,
            provider: None,
            provider_id: None,
            social: false,
            is_active: true,
            roles: BTreeSet::from([MemberRole::User]),
            audit,
        }
    }

    /// An account linked to an external identity provider
    pub fn social(
        email: impl Into<String>,
        nickname: impl Into<String>,
        provider: impl Into<String>,
        provider_id: impl Into<String>,
        audit: AuditFields,
    ) -> Self {
        Self {
            provider: Some(provider.into()),
            provider_id: Some(provider_id.into()),
            social: true,
            ..Self::new(email, nickname, None, audit)
        }
    }

    /// Returns `false` when the role was already held
    pub fn add_role(&mut self, role: MemberRole) -> bool {
        self.roles.insert(role)
    }

    /// Returns `false` when the role was not held
    pub fn remove_role(&mut self, role: MemberRole) -> bool {
        self.roles.remove(&role)
    }

    pub fn clear_roles(&mut self) {
        self.roles.clear();
    }

    pub fn has_role(&self, role: MemberRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn update_member_info(&mut self, nickname: impl Into<String>, picture_url: Option<String>) {
        self.nickname = nickname.into();
        self.picture_url = picture_url;
    }

    pub fn change_password(&mut self, password_hash: String) {
        self.password = Some(password_hash);
    }

    pub fn change_social(&mut self, social: bool) {
        self.social = social;
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn role_names(&self) -> BTreeSet<String> {
        self.roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}

impl Auditable for Member {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member::new("user@example.com", "CoolDev", Some("hash".into()), AuditFields::default())
    }

    #[test]
    fn test_new_member_defaults() {
        let member = member();
        assert!(member.is_active);
        assert!(!member.social);
        assert!(member.has_role(MemberRole::User));
        assert_eq!(member.role_names(), BTreeSet::from(["USER".to_string()]));
    }

    #[test]
    fn test_social_member() {
        let member = Member::social("s@example.com", "Social", "kakao", "kakao_1", AuditFields::default());
        assert!(member.social);
        assert!(member.password.is_none());
        assert_eq!(member.provider.as_deref(), Some("kakao"));
    }

    #[test]
    fn test_add_and_remove_role() {
        let mut member = member();
        assert!(member.add_role(MemberRole::Admin));
        assert!(!member.add_role(MemberRole::Admin));
        assert!(member.remove_role(MemberRole::Admin));
        assert!(!member.remove_role(MemberRole::Admin));
    }

    #[test]
    fn test_member_role_from_str() {
        assert_eq!("admin".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert_eq!("ROLE_MANAGER".parse::<MemberRole>().unwrap(), MemberRole::Manager);
        assert!("ROLE_SELLER".parse::<MemberRole>().is_err());
    }

    #[test]
    fn test_update_member_info() {
        let mut member = member();
        member.update_member_info("NewName", Some("https://img/1.png".into()));
        assert_eq!(member.nickname, "NewName");
        assert_eq!(member.picture_url.as_deref(), Some("https://img/1.png"));
    }
}
