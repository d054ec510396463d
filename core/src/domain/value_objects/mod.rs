//! Outbound representations of domain entities.

pub mod audit_dto;
pub mod cart_response;
pub mod member_response;
pub mod product_response;
pub mod role_response;
pub mod todo_response;

// Re-export commonly used types
pub use audit_dto::{format_timestamp, map_audit, AuditDto, AUDIT_TIMESTAMP_FORMAT};
pub use cart_response::{CartItemResponse, CartResponse};
pub use member_response::MemberResponse;
pub use product_response::ProductResponse;
pub use role_response::RoleResponse;
pub use todo_response::TodoResponse;
