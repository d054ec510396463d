//! Member repository module.

mod r#trait;
pub use r#trait::{MemberFilter, MemberRepository};

mod memory;
pub use memory::InMemoryMemberRepository;
