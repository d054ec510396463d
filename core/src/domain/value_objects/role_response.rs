use serde::{Deserialize, Serialize};

use super::audit_dto::{map_audit, AuditDto};
use crate::domain::entities::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: i64,
    pub role_name: String,
    pub description: Option<String>,
    pub is_default: bool,
    /// Members holding the matching member role
    pub member_count: u64,
    #[serde(flatten)]
    pub audit: AuditDto,
}

impl RoleResponse {
    pub fn new(role: &Role, member_count: u64) -> Self {
        Self {
            id: role.id,
            role_name: role.role_name.clone(),
            description: role.description.clone(),
            is_default: role.is_default(),
            member_count,
            audit: map_audit(role),
        }
    }
}
