//! Boundary conversion from failures to the response envelope
//!
//! Handlers return [`ApiError`] for anything that goes wrong. Its
//! `ResponseError` implementation picks the status and error block, logs
//! at the severity of the failure, and never exposes a stack trace.

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use mall_core::errors::DomainError;
use mall_shared::{validation_messages, ErrorCode, ErrorInfo, FieldError, HttpStatus, VALIDATION_ERROR_CODE};
use validator::ValidationErrors;

use super::response::AxResponseEntity;

/// Every failure a handler can report
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Coded failure raised below the boundary
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid or unreadable request body
    #[error("{}", validation_messages::BODY_FAILED)]
    InvalidBody {
        field_errors: Vec<FieldError>,
        details: Option<String>,
    },

    /// Invalid query or path parameters
    #[error("{}", validation_messages::PARAMETER_FAILED)]
    InvalidParameters {
        field_errors: Vec<FieldError>,
        details: Option<String>,
    },
}

pub type ApiResult<T> = Result<AxResponseEntity<T>, ApiError>;

impl ApiError {
    pub fn invalid_body(errors: &ValidationErrors) -> Self {
        ApiError::InvalidBody {
            field_errors: field_errors(errors),
            details: None,
        }
    }

    pub fn invalid_parameters(errors: &ValidationErrors) -> Self {
        ApiError::InvalidParameters {
            field_errors: field_errors(errors),
            details: None,
        }
    }

    /// The envelope for this failure, without a request path
    pub fn to_entity(&self) -> AxResponseEntity<()> {
        match self {
            ApiError::Domain(error) => {
                let code = error.error_code();
                let details = error.details().unwrap_or(code.message());
                let info = ErrorInfo::new(code.http_status_code(), code.message()).with_code(code.code());
                let info = match error {
                    DomainError::Internal { .. } => info,
                    _ => info.with_details(details),
                };
                AxResponseEntity::failure(code.status(), code.message(), info)
            }
            ApiError::InvalidBody { field_errors, details } => {
                let info = ErrorInfo::new(HttpStatus::BadRequest.name(), validation_messages::BODY_INVALID)
                    .with_code(VALIDATION_ERROR_CODE)
                    .with_details(details.as_deref().unwrap_or(validation_messages::BODY_DETAILS))
                    .with_field_errors(field_errors.clone());
                AxResponseEntity::failure(HttpStatus::BadRequest, validation_messages::BODY_FAILED, info)
            }
            ApiError::InvalidParameters { field_errors, details } => {
                let info = ErrorInfo::new(HttpStatus::BadRequest.name(), validation_messages::PARAMETER_FAILED)
                    .with_code(VALIDATION_ERROR_CODE)
                    .with_details(details.as_deref().unwrap_or(validation_messages::PARAMETER_DETAILS))
                    .with_field_errors(field_errors.clone());
                AxResponseEntity::failure(HttpStatus::BadRequest, validation_messages::PARAMETER_FAILED, info)
            }
        }
    }

    /// Render the envelope, stamping `path` when known
    pub fn render(&self, path: Option<&str>) -> HttpResponse {
        let entity = self.to_entity();
        match path {
            Some(path) => entity.with_path(path).into_http_response(),
            None => entity.into_http_response(),
        }
    }

    fn log(&self) {
        match self {
            ApiError::Domain(error @ DomainError::Business(_)) => {
                log::warn!("Business exception: {}", error);
            }
            ApiError::Domain(error @ DomainError::Custom(coded)) => match coded.cause() {
                Some(cause) => log::error!("Custom exception: {} (caused by: {:?})", error, cause),
                None => log::error!("Custom exception: {}", error),
            },
            ApiError::Domain(error @ DomainError::Internal { .. }) => {
                log::error!("Unexpected exception: {:?}", error);
            }
            ApiError::InvalidBody { field_errors, details } => {
                log::warn!("Request body validation failed: {:?} {:?}", field_errors, details);
            }
            ApiError::InvalidParameters { field_errors, details } => {
                log::warn!("Parameter validation failed: {:?} {:?}", field_errors, details);
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let status = self.to_entity().status();
        StatusCode::from_u16(status.value()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        self.log();
        self.render(None)
    }
}

/// Flatten validator output into one entry per failed constraint, sorted by field
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut result: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            let field = to_camel_case(&field);
            errors.iter().map(move |error| {
                let rejected = error
                    .params
                    .get("value")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                FieldError::new(field.clone(), rejected, message)
            })
        })
        .collect();
    result.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    result
}

/// `picture_url` -> `pictureUrl`
fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            result.extend(ch.to_uppercase());
            upper = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// `JsonConfig` error handler: unreadable bodies get the validation envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejecting body for {}: {}", req.path(), err);
    ApiError::InvalidBody {
        field_errors: Vec::new(),
        details: Some(err.to_string()),
    }
    .into()
}

/// `QueryConfig` error handler
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejecting query for {}: {}", req.path(), err);
    ApiError::InvalidParameters {
        field_errors: Vec::new(),
        details: Some(err.to_string()),
    }
    .into()
}

/// `PathConfig` error handler
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejecting path {}: {}", req.path(), err);
    ApiError::InvalidParameters {
        field_errors: Vec::new(),
        details: Some(err.to_string()),
    }
    .into()
}

/// Shorthand for a business error with details, used by handlers
pub fn business(code: ErrorCode, details: impl Into<String>) -> ApiError {
    ApiError::Domain(DomainError::business(code).with_details(details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    struct Sample {
        #[validate(required(message = "제목은 필수입니다."))]
        title: Option<String>,
        #[validate(length(max = 3, message = "too long"))]
        picture_url: Option<String>,
    }

    async fn body_of(response: HttpResponse) -> serde_json::Value {
        let bytes = body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_business_error_uses_details() {
        let err = ApiError::from(
            DomainError::business(ErrorCode::TodoNotFound).with_details("할일번호 9에 해당하는 할일을 찾을 수 없습니다."),
        );
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let value = body_of(err.render(Some("/api/v1/todos/9"))).await;
        assert_eq!(value["statusCode"], 404);
        assert_eq!(value["message"], ErrorCode::TodoNotFound.message());
        assert_eq!(value["error"]["code"], "T001");
        assert_eq!(value["error"]["hscode"], "NOT_FOUND");
        assert_eq!(value["error"]["details"], "할일번호 9에 해당하는 할일을 찾을 수 없습니다.");
        assert_eq!(value["path"], "/api/v1/todos/9");
    }

    #[actix_web::test]
    async fn test_custom_error_without_details_falls_back_to_message() {
        let err = ApiError::from(DomainError::custom(ErrorCode::DatabaseError));
        let value = body_of(err.render(None)).await;
        assert_eq!(value["statusCode"], 500);
        assert_eq!(value["error"]["code"], "E003");
        assert_eq!(value["error"]["details"], ErrorCode::DatabaseError.message());
    }

    #[actix_web::test]
    async fn test_internal_error_is_generic() {
        let err = ApiError::from(DomainError::internal("lock poisoned"));
        let value = body_of(err.render(None)).await;
        assert_eq!(value["statusCode"], 500);
        assert_eq!(value["error"]["code"], "E001");
        assert!(value["error"].get("details").is_none());
        assert!(!value.to_string().contains("lock poisoned"));
    }

    #[actix_web::test]
    async fn test_body_validation_envelope() {
        let sample = Sample {
            title: None,
            picture_url: Some("abcdef".to_string()),
        };
        let err = ApiError::invalid_body(&sample.validate().unwrap_err());
        let value = body_of(err.render(None)).await;

        assert_eq!(value["statusCode"], 400);
        assert_eq!(value["message"], validation_messages::BODY_FAILED);
        assert_eq!(value["error"]["code"], VALIDATION_ERROR_CODE);
        assert_eq!(value["error"]["message"], validation_messages::BODY_INVALID);
        let fields = value["error"]["fieldErrors"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["field"], "pictureUrl");
        assert_eq!(fields[0]["rejectedValue"], "abcdef");
        assert_eq!(fields[1]["field"], "title");
        assert_eq!(fields[1]["message"], "제목은 필수입니다.");
    }

    #[actix_web::test]
    async fn test_parameter_validation_envelope() {
        let err = ApiError::InvalidParameters {
            field_errors: Vec::new(),
            details: None,
        };
        let value = body_of(err.render(None)).await;
        assert_eq!(value["message"], validation_messages::PARAMETER_FAILED);
        assert_eq!(value["error"]["message"], validation_messages::PARAMETER_FAILED);
        assert_eq!(value["error"]["details"], validation_messages::PARAMETER_DETAILS);
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("title"), "title");
        assert_eq!(to_camel_case("picture_url"), "pictureUrl");
        assert_eq!(to_camel_case("stock_quantity_max"), "stockQuantityMax");
    }
}
