//! Request and query DTOs with their validation rules

pub mod cart;
pub mod member;
pub mod page;
pub mod product;
pub mod role;
pub mod sample;
pub mod todo;

use actix_web::web;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::handlers::ApiError;

pub use page::PageParams;

/// `?keyword=` of the search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordParams {
    pub keyword: String,
}

/// Unwrap a JSON body, rejecting it with the validation envelope when a rule fails
pub fn validated<T: Validate>(body: web::Json<T>) -> Result<T, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(|errors| ApiError::invalid_body(&errors))?;
    Ok(body)
}

/// Rejects strings that are empty after trimming
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("할일").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }
}
