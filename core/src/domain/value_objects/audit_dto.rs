//! Audit fields as exposed on outbound DTOs

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{AuditFields, Auditable};

/// Wire format of audit timestamps
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Audit block flattened into every response DTO
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditDto {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub created_by: Option<String>,
    pub created_by_nickname: Option<String>,
    pub updated_by: Option<String>,
    pub updated_by_nickname: Option<String>,
    pub deleted: bool,
}

impl From<&AuditFields> for AuditDto {
    fn from(fields: &AuditFields) -> Self {
        Self {
            created_at: Some(format_timestamp(fields.created_at)),
            updated_at: Some(format_timestamp(fields.updated_at)),
            created_by: fields.created_by.as_ref().map(|a| a.email.clone()),
            created_by_nickname: fields.created_by.as_ref().map(|a| a.nickname.clone()),
            updated_by: fields.updated_by.as_ref().map(|a| a.email.clone()),
            updated_by_nickname: fields.updated_by.as_ref().map(|a| a.nickname.clone()),
            deleted: fields.deleted,
        }
    }
}

/// Copy the audit trail of any entity onto its DTO form.
///
/// Missing creator or updater references leave the matching fields unset.
pub fn map_audit<E: Auditable + ?Sized>(entity: &E) -> AuditDto {
    AuditDto::from(entity.audit())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(AUDIT_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Actor, AuditContext, Todo};
    use chrono::TimeZone;

    #[test]
    fn test_missing_actors_stay_unset() {
        let todo = Todo::new("t", "w", false, AuditFields::created(&AuditContext::anonymous()));
        let dto = map_audit(&todo);
        assert!(dto.created_by.is_none());
        assert!(dto.created_by_nickname.is_none());
        assert!(dto.updated_by.is_none());
        assert!(dto.updated_by_nickname.is_none());
        assert!(dto.created_at.is_some());
        assert!(!dto.deleted);
    }

    #[test]
    fn test_full_copy() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let updated_at = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        let fields = AuditFields {
            created_by: Some(Actor::new("a@example.com", "Alice")),
            updated_by: Some(Actor::new("b@example.com", "Bob")),
            created_at,
            updated_at,
            deleted: true,
        };
        let todo = Todo::new("t", "w", false, fields);
        let dto = map_audit(&todo);

        assert_eq!(dto.created_by.as_deref(), Some("a@example.com"));
        assert_eq!(dto.created_by_nickname.as_deref(), Some("Alice"));
        assert_eq!(dto.updated_by.as_deref(), Some("b@example.com"));
        assert_eq!(dto.updated_by_nickname.as_deref(), Some("Bob"));
        assert_eq!(dto.created_at, Some(format_timestamp(created_at)));
        assert_eq!(dto.updated_at, Some(format_timestamp(updated_at)));
        assert!(dto.deleted);
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let rendered = format_timestamp(at);
        assert_eq!(rendered.len(), "2024-12-31 23:59:59".len());
        assert_eq!(&rendered[4..5], "-");
        assert_eq!(&rendered[10..11], " ");
    }
}
