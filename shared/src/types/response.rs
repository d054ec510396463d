//! API response envelope types

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::HttpStatus;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Uniform wrapper around every response body.
///
/// Exactly one of `data` and `error` is populated, depending on `success`.
/// Absent fields are left out of the serialized JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Human readable outcome message
    pub message: String,

    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error block (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,

    /// Instant the envelope was built
    pub timestamp: NaiveDateTime,

    /// Request URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// HTTP status mirrored into the body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Reason phrase of `status_code`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
}

impl<T> AxResponse<T> {
    /// Successful response carrying data
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: now(),
            path: None,
            status_code: None,
            status_text: None,
        }
    }

    /// Successful response without data
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
            timestamp: now(),
            path: None,
            status_code: None,
            status_text: None,
        }
    }

    /// Failed response with a prepared error block
    pub fn failure(message: impl Into<String>, error: ErrorInfo) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error),
            timestamp: now(),
            path: None,
            status_code: None,
            status_text: None,
        }
    }

    /// Failed response whose error block is built from its parts
    pub fn failure_with(
        message: impl Into<String>,
        hscode: impl Into<String>,
        code: impl Into<String>,
        status_code: u16,
        status_text: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let error = ErrorInfo::new(hscode, message.clone()).with_code(code);
        Self {
            status_code: Some(status_code),
            status_text: Some(status_text.into()),
            ..Self::failure(message, error)
        }
    }

    /// Stamp the status code and reason phrase into the body
    pub fn with_status(mut self, status: HttpStatus) -> Self {
        self.status_code = Some(status.value());
        self.status_text = Some(status.reason_phrase().to_string());
        self
    }

    /// Set the request URI
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the data to a different type
    pub fn map<U, F>(self, f: F) -> AxResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        AxResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            error: self.error,
            timestamp: self.timestamp,
            path: self.path,
            status_code: self.status_code,
            status_text: self.status_text,
        }
    }
}

/// Error block of a failed response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// HTTP status name, e.g. `NOT_FOUND`
    pub hscode: String,

    /// Business code, e.g. `T001`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    pub timestamp: NaiveDateTime,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// One entry per failed constraint, validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

impl ErrorInfo {
    pub fn new(hscode: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hscode: hscode.into(),
            code: None,
            message: message.into(),
            details: None,
            timestamp: now(),
            path: None,
            field_errors: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = Some(field_errors);
        self
    }
}

/// A single failed validation constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub rejected_value: serde_json::Value,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        rejected_value: serde_json::Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rejected_value,
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Service version
    pub version: String,

    /// Timestamp of health check
    pub timestamp: NaiveDateTime,
}

impl HealthResponse {
    pub fn up(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Up,
            service: service.into(),
            version: version.into(),
            timestamp: now(),
        }
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}
