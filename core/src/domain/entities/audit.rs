//! Audit trail carried by every persisted entity.
//!
//! The acting member is never looked up implicitly: callers build an
//! [`AuditContext`] per request and hand it to each mutating operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the member performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub email: String,
    pub nickname: String,
}

impl Actor {
    pub fn new(email: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            nickname: nickname.into(),
        }
    }

    /// Identity used by startup jobs
    pub fn system() -> Self {
        Self::new(SYSTEM_ACTOR_EMAIL, SYSTEM_ACTOR_NICKNAME)
    }
}

/// Email of the built-in system member
pub const SYSTEM_ACTOR_EMAIL: &str = "system@admin.com";

/// Nickname of the built-in system member
pub const SYSTEM_ACTOR_NICKNAME: &str = "시스템관리자";

/// Who is acting and when, passed explicitly into every write
#[derive(Debug, Clone, PartialEq)]
pub struct AuditContext {
    actor: Option<Actor>,
    at: DateTime<Utc>,
}

impl AuditContext {
    pub fn new(actor: Option<Actor>) -> Self {
        Self {
            actor,
            at: Utc::now(),
        }
    }

    pub fn for_actor(actor: Actor) -> Self {
        Self::new(Some(actor))
    }

    /// No identifiable actor; creator and updater stay unset
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn system() -> Self {
        Self::for_actor(Actor::system())
    }

    /// Pin the instant recorded by this context
    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = at;
        self
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Creator, updater, timestamps and the soft-delete flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_by: Option<Actor>,
    pub updated_by: Option<Actor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
}

impl AuditFields {
    /// Fields for a record persisted for the first time
    pub fn created(ctx: &AuditContext) -> Self {
        Self {
            created_by: ctx.actor().cloned(),
            updated_by: ctx.actor().cloned(),
            created_at: ctx.timestamp(),
            updated_at: ctx.timestamp(),
            deleted: false,
        }
    }

    /// Record a mutating write. Creator fields are left untouched.
    pub fn touch(&mut self, ctx: &AuditContext) {
        self.updated_by = ctx.actor().cloned();
        self.updated_at = ctx.timestamp();
    }

    pub fn soft_delete(&mut self, ctx: &AuditContext) {
        self.deleted = true;
        self.touch(ctx);
    }

    pub fn restore(&mut self, ctx: &AuditContext) {
        self.deleted = false;
        self.touch(ctx);
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

impl Default for AuditFields {
    fn default() -> Self {
        Self::created(&AuditContext::anonymous())
    }
}

/// Entities carrying [`AuditFields`]
pub trait Auditable {
    fn audit(&self) -> &AuditFields;

    fn audit_mut(&mut self) -> &mut AuditFields;

    fn touch(&mut self, ctx: &AuditContext) {
        self.audit_mut().touch(ctx);
    }

    fn soft_delete(&mut self, ctx: &AuditContext) {
        self.audit_mut().soft_delete(ctx);
    }

    fn restore(&mut self, ctx: &AuditContext) {
        self.audit_mut().restore(ctx);
    }

    fn is_deleted(&self) -> bool {
        self.audit().is_deleted()
    }
}
