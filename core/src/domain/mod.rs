//! Aggregates and the DTOs handlers serialize.
//!
//! `entities` is what storage persists; `value_objects` is what leaves the API.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
