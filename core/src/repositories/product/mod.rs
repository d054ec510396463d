//! Product repository module.

mod r#trait;
pub use r#trait::{ProductFilter, ProductRepository};

mod memory;
pub use memory::InMemoryProductRepository;
