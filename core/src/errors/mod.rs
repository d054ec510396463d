//! Domain-specific error types and error handling.
//!
//! Every failure a service can report is a [`DomainError`]. Coded errors
//! carry an [`ErrorCode`] from the shared registry plus optional details and
//! an optional root cause, and travel unchanged up to the HTTP boundary.

use std::error::Error as StdError;
use std::fmt;

use mall_shared::ErrorCode;
use thiserror::Error;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// An [`ErrorCode`] with the context attached where it was raised
#[derive(Debug)]
pub struct CodedError {
    pub code: ErrorCode,
    pub details: Option<String>,
    source: Option<BoxedSource>,
}

impl CodedError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            details: None,
            source: None,
        }
    }

    /// Root cause, if one was attached
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "[{}] {}: {}", self.code.code(), self.code.message(), details),
            None => write!(f, "[{}] {}", self.code.code(), self.code.message()),
        }
    }
}

impl StdError for CodedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Coded failure reported at error severity
    #[error("{0}")]
    Custom(CodedError),

    /// Expected business condition (missed lookup, rule violation), reported at warn severity
    #[error("Business rule violation: {0}")]
    Business(CodedError),

    /// Unclassified failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Coded error without details or cause
    pub fn custom(code: ErrorCode) -> Self {
        DomainError::Custom(CodedError::new(code))
    }

    /// Business error without details or cause
    pub fn business(code: ErrorCode) -> Self {
        DomainError::Business(CodedError::new(code))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Attach free-text details. Has no effect on `Internal`.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        if let Some(coded) = self.coded_mut() {
            coded.details = Some(details.into());
        }
        self
    }

    /// Attach the root cause. Has no effect on `Internal`.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        if let Some(coded) = self.coded_mut() {
            coded.source = Some(Box::new(source));
        }
        self
    }

    /// The registry entry behind this error; `Internal` maps to E001
    pub fn error_code(&self) -> ErrorCode {
        match self {
            DomainError::Custom(coded) | DomainError::Business(coded) => coded.code,
            DomainError::Internal { .. } => ErrorCode::InternalServerError,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            DomainError::Custom(coded) | DomainError::Business(coded) => coded.details.as_deref(),
            DomainError::Internal { .. } => None,
        }
    }

    pub fn is_business(&self) -> bool {
        matches!(self, DomainError::Business(_))
    }

    fn coded_mut(&mut self) -> Option<&mut CodedError> {
        match self {
            DomainError::Custom(coded) | DomainError::Business(coded) => Some(coded),
            DomainError::Internal { .. } => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
