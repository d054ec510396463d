//! Shopping cart and cart item entities

use mall_shared::ErrorCode;
use serde::{Deserialize, Serialize};

use super::audit::{AuditFields, Auditable};
use crate::errors::{DomainError, DomainResult};

/// A member's cart. Every member owns at most one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Identifier, 0 until the record is first saved
    pub cno: i64,
    /// Email of the owning member
    pub owner_email: String,
    pub audit: AuditFields,
}

impl Cart {
    pub fn new(owner_email: impl Into<String>, audit: AuditFields) -> Self {
        Self {
            cno: 0,
            owner_email: owner_email.into(),
            audit,
        }
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email == email
    }
}

impl Auditable for Cart {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

/// One product line inside a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Identifier, 0 until the record is first saved
    pub cino: i64,
    pub cno: i64,
    pub product_id: i64,
    pub qty: i32,
    pub audit: AuditFields,
}

impl CartItem {
    pub fn new(cno: i64, product_id: i64, qty: i32, audit: AuditFields) -> Self {
        Self {
            cino: 0,
            cno,
            product_id,
            qty,
            audit,
        }
    }

    pub fn change_qty(&mut self, qty: i32) {
        self.qty = qty;
    }

    /// Add to the quantity; fails with C001 instead of overflowing
    pub fn add_qty(&mut self, qty: i32) -> DomainResult<()> {
        let current = self.qty;
        self.qty = current.checked_add(qty).ok_or_else(|| {
            DomainError::business(ErrorCode::InvalidInputValue)
                .with_details(format!("수량 {}에 {}을 더할 수 없습니다", current, qty))
        })?;
        Ok(())
    }
}

impl Auditable for CartItem {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}
