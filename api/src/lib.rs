//! HTTP surface of the mall server.
//!
//! The binary in `main.rs` only loads configuration, picks a storage backend
//! and runs [`create_app`]; integration tests build the same app over
//! in-memory storage.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod state;

pub use app::create_app;
pub use state::AppState;
