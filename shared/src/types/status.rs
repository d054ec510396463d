//! HTTP status values carried inside the response envelope

use serde::{Deserialize, Serialize};

/// The HTTP statuses this service answers with.
///
/// Kept independent of any web framework so the envelope types and the
/// error registry can be shared by every crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpStatus {
    Ok,
    Created,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    RequestTimeout,
    Conflict,
    TooManyRequests,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
}

impl HttpStatus {
    /// Numeric status code
    pub fn value(&self) -> u16 {
        match self {
            HttpStatus::Ok => 200,
            HttpStatus::Created => 201,
            HttpStatus::BadRequest => 400,
            HttpStatus::Unauthorized => 401,
            HttpStatus::Forbidden => 403,
            HttpStatus::NotFound => 404,
            HttpStatus::RequestTimeout => 408,
            HttpStatus::Conflict => 409,
            HttpStatus::TooManyRequests => 429,
            HttpStatus::InternalServerError => 500,
            HttpStatus::BadGateway => 502,
            HttpStatus::ServiceUnavailable => 503,
        }
    }

    /// Symbolic name, e.g. `NOT_FOUND`
    pub fn name(&self) -> &'static str {
        match self {
            HttpStatus::Ok => "OK",
            HttpStatus::Created => "CREATED",
            HttpStatus::BadRequest => "BAD_REQUEST",
            HttpStatus::Unauthorized => "UNAUTHORIZED",
            HttpStatus::Forbidden => "FORBIDDEN",
            HttpStatus::NotFound => "NOT_FOUND",
            HttpStatus::RequestTimeout => "REQUEST_TIMEOUT",
            HttpStatus::Conflict => "CONFLICT",
            HttpStatus::TooManyRequests => "TOO_MANY_REQUESTS",
            HttpStatus::InternalServerError => "INTERNAL_SERVER_ERROR",
            HttpStatus::BadGateway => "BAD_GATEWAY",
            HttpStatus::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Standard reason phrase, e.g. `Not Found`
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            HttpStatus::Ok => "OK",
            HttpStatus::Created => "Created",
            HttpStatus::BadRequest => "Bad Request",
            HttpStatus::Unauthorized => "Unauthorized",
            HttpStatus::Forbidden => "Forbidden",
            HttpStatus::NotFound => "Not Found",
            HttpStatus::RequestTimeout => "Request Timeout",
            HttpStatus::Conflict => "Conflict",
            HttpStatus::TooManyRequests => "Too Many Requests",
            HttpStatus::InternalServerError => "Internal Server Error",
            HttpStatus::BadGateway => "Bad Gateway",
            HttpStatus::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Look a status up by its numeric code
    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.value() == value)
    }

    /// Every status in ascending numeric order
    pub const ALL: [HttpStatus; 12] = [
        HttpStatus::Ok,
        HttpStatus::Created,
        HttpStatus::BadRequest,
        HttpStatus::Unauthorized,
        HttpStatus::Forbidden,
        HttpStatus::NotFound,
        HttpStatus::RequestTimeout,
        HttpStatus::Conflict,
        HttpStatus::TooManyRequests,
        HttpStatus::InternalServerError,
        HttpStatus::BadGateway,
        HttpStatus::ServiceUnavailable,
    ];

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.value())
    }
}

impl std::fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value(), self.reason_phrase())
    }
}
