//! Shared types for the mall server
//!
//! This crate provides the pieces every layer agrees on:
//! - The error code registry
//! - The response envelope and pagination payloads
//! - Configuration types

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, LoggingConfig, SeedConfig, ServerConfig,
    StorageBackend,
};
pub use errors::{validation_messages, ErrorCode, VALIDATION_ERROR_CODE};
pub use types::{
    AxResponse, ErrorInfo, FieldError, HealthResponse, HealthStatus, HttpStatus, Page, PageQuery,
    PageResponse, Pageable, Sort, SortOrder, SortParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
