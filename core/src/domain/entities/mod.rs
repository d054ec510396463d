//! Domain entities representing core business objects.

mod audit;
mod cart;
mod member;
mod product;
mod role;
mod todo;

// Re-export commonly used types
pub use audit::{Actor, AuditContext, AuditFields, Auditable, SYSTEM_ACTOR_EMAIL, SYSTEM_ACTOR_NICKNAME};
pub use cart::{Cart, CartItem};
pub use member::{Member, MemberRole};
pub use product::{Product, ProductImage, ProductStatus, DEFAULT_CATEGORY};
pub use role::{Role, BUILT_IN_ROLES, DEFAULT_ROLE_NAME};
pub use todo::{Todo, TODO_TEXT_MAX_LEN};
