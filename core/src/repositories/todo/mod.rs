//! Todo repository module.

mod r#trait;
pub use r#trait::{TodoFilter, TodoRepository};

mod memory;
pub use memory::InMemoryTodoRepository;
