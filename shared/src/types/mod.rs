//! Type definitions module
//!
//! - `pagination` - Page requests, repository pages and page payloads
//! - `response` - The response envelope and health checks
//! - `sort` - Sort criteria parsing
//! - `status` - HTTP statuses carried in the envelope

pub mod pagination;
pub mod response;
pub mod sort;
pub mod status;

pub use pagination::{Page, PageQuery, PageResponse, Pageable, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use response::{AxResponse, ErrorInfo, FieldError, HealthResponse, HealthStatus};
pub use sort::{Sort, SortOrder, SortParams};
pub use status::HttpStatus;
