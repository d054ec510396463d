//! Business services containing domain logic and use cases.
//!
//! Every mutating operation takes an [`AuditContext`](crate::domain::entities::AuditContext)
//! naming the acting member; lookups that miss fail with the feature's
//! business error code.

mod cart;
mod member;
mod password;
mod product;
mod role;
mod todo;

pub use cart::{AddCartItem, CartService};
pub use member::{
    default_member_sort, ChangePassword, CreateMember, MemberService, MemberServiceConfig, UpdateMember,
    MEMBER_SORT_FIELDS,
};
pub use password::PasswordEncoder;
pub use product::{
    default_product_sort, CreateProduct, ProductSearch, ProductService, ProductServiceConfig, UpdateProduct,
    PRODUCT_SORT_FIELDS,
};
pub use role::{default_role_sort, CreateRole, RoleService, UpdateRole, ROLE_SORT_FIELDS};
pub use todo::{default_todo_sort, CreateTodo, TodoService, TodoServiceConfig, UpdateTodo, TODO_SORT_FIELDS};
