//! Envelope plus transport status, built together so the two never drift apart

use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder};
use mall_shared::{AxResponse, ErrorCode, ErrorInfo, HttpStatus, PageResponse};
use serde::Serialize;

/// An [`AxResponse`] paired with the HTTP status it is sent with.
///
/// Every constructor stamps `statusCode`/`statusText` into the body from the
/// same [`HttpStatus`] used for the transport, and `path` is filled from the
/// request URI when the response is rendered.
#[derive(Debug, Clone)]
pub struct AxResponseEntity<T> {
    status: HttpStatus,
    body: AxResponse<T>,
}

impl<T> AxResponseEntity<T> {
    fn new(status: HttpStatus, body: AxResponse<T>) -> Self {
        Self {
            status,
            body: body.with_status(status),
        }
    }

    // ==================== success ====================

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Ok, AxResponse::success(data, message))
    }

    /// 200 with a message and no `data` member
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Ok, AxResponse::success_message(message))
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Created, AxResponse::success(data, message))
    }

    pub fn updated(data: T, message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Ok, AxResponse::success(data, message))
    }

    // ==================== ErrorCode based failures ====================

    pub fn error(code: ErrorCode) -> Self {
        Self::error_with_message(code, code.message())
    }

    /// Failure for `code` whose top-level and error message is `message`
    pub fn error_with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let error = ErrorInfo::new(code.http_status_code(), message.clone())
            .with_code(code.code())
            .with_details(code.message());
        Self::failure(code.status(), message, error)
    }

    pub fn not_found(code: ErrorCode) -> Self {
        Self::error(code)
    }

    pub fn bad_request(code: ErrorCode) -> Self {
        Self::error(code)
    }

    pub fn unauthorized(code: ErrorCode) -> Self {
        Self::error(code)
    }

    pub fn forbidden(code: ErrorCode) -> Self {
        Self::error(code)
    }

    pub fn conflict(code: ErrorCode) -> Self {
        Self::error(code)
    }

    pub fn internal_server_error(code: ErrorCode) -> Self {
        Self::error(code)
    }

    // ==================== free-form failures ====================

    pub fn not_found_with(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::NotFound, message.into(), Some(code.into()))
    }

    pub fn bad_request_with(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::BadRequest, message.into(), Some(code.into()))
    }

    /// Failure with a prepared error block
    pub fn failure(status: HttpStatus, message: impl Into<String>, error: ErrorInfo) -> Self {
        Self::new(status, AxResponse::failure(message, error))
    }

    fn status_failure(status: HttpStatus, message: String, code: Option<String>) -> Self {
        let mut error = ErrorInfo::new(status.name(), message.clone());
        if let Some(code) = code {
            error = error.with_code(code);
        }
        Self::failure(status, message, error)
    }

    pub fn status(&self) -> HttpStatus {
        self.status
    }

    pub fn body(&self) -> &AxResponse<T> {
        &self.body
    }

    pub fn into_body(self) -> AxResponse<T> {
        self.body
    }

    /// Set `path` on the envelope and its error block unless already present
    pub fn with_path(mut self, path: &str) -> Self {
        if self.body.path.is_none() {
            self.body.path = Some(path.to_string());
        }
        if let Some(error) = self.body.error.as_mut() {
            if error.path.is_none() {
                error.path = Some(path.to_string());
            }
        }
        self
    }
}

impl<T> AxResponseEntity<PageResponse<T>> {
    pub fn ok_page(page: PageResponse<T>, message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Ok, AxResponse::success(page, message))
    }
}

impl AxResponseEntity<()> {
    /// Successful deletion, no data
    pub fn deleted(message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Ok, AxResponse::success_message(message))
    }

    pub fn bad_request_message(message: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::BadRequest, message.into(), None)
    }

    pub fn unauthorized_message(message: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::Unauthorized, message.into(), None)
    }

    pub fn forbidden_message(message: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::Forbidden, message.into(), None)
    }

    pub fn not_found_message(message: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::NotFound, message.into(), None)
    }

    pub fn conflict_message(message: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::Conflict, message.into(), None)
    }

    pub fn internal_server_error_message(message: impl Into<String>) -> Self {
        Self::status_failure(HttpStatus::InternalServerError, message.into(), None)
    }
}

impl<T: Serialize> AxResponseEntity<T> {
    /// Serialize into an HTTP response, leaving `path` as it is
    pub fn into_http_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status.value()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self.body)
    }
}

impl<T: Serialize> Responder for AxResponseEntity<T> {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.with_path(req.path()).into_http_response()
    }
}
