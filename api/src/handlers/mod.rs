//! Response building and boundary error conversion

pub mod error;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use response::AxResponseEntity;
