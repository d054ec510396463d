//! Role entity

use serde::{Deserialize, Serialize};

use super::audit::{AuditFields, Auditable};

/// Name of the role granted to every new member
pub const DEFAULT_ROLE_NAME: &str = "ROLE_USER";

/// Role names created at startup
pub const BUILT_IN_ROLES: [(&str, &str); 4] = [
    ("ROLE_USER", "일반 사용자"),
    ("ROLE_ADMIN", "관리자"),
    ("ROLE_MANAGER", "매니저"),
    ("ROLE_SELLER", "판매자"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Identifier, 0 until the record is first saved
    pub id: i64,
    pub role_name: String,
    pub description: Option<String>,
    pub audit: AuditFields,
}

impl Role {
    pub fn new(role_name: impl Into<String>, description: Option<String>, audit: AuditFields) -> Self {
        Self {
            id: 0,
            role_name: role_name.into(),
            description,
            audit,
        }
    }

    pub fn is_default(&self) -> bool {
        self.role_name == DEFAULT_ROLE_NAME
    }

    pub fn change_name(&mut self, role_name: impl Into<String>) {
        self.role_name = role_name.into();
    }

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// The member role matching this role's name, e.g. `ROLE_ADMIN` -> `Admin`
    pub fn member_role(&self) -> Option<super::member::MemberRole> {
        self.role_name
            .strip_prefix("ROLE_")
            .unwrap_or(&self.role_name)
            .parse()
            .ok()
    }
}

impl Auditable for Role {
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
    use crate::domain::entities::member::MemberRole;

    #[test]
    fn test_is_default() {
        let user = Role::new("ROLE_USER", None, AuditFields::default());
        let admin = Role::new("ROLE_ADMIN", Some("관리자".into()), AuditFields::default());
        assert!(user.is_default());
        assert!(!admin.is_default());
    }

    #[test]
    fn test_member_role_mapping() {
        let admin = Role::new("ROLE_ADMIN", None, AuditFields::default());
        let seller = Role::new("ROLE_SELLER", None, AuditFields::default());
        assert_eq!(admin.member_role(), Some(MemberRole::Admin));
        assert_eq!(seller.member_role(), None);
    }
}
