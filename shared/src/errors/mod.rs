//! Error code registry shared by every layer
//!
//! Each [`ErrorCode`] is a fixed triple of HTTP status, short business code
//! and human readable message. Codes are grouped by the area they belong to:
//! U=user, M=member, R=role, T=todo, P=product, S=sample, C=common, A=auth,
//! E=server, B=business rule.

use crate::types::HttpStatus;

macro_rules! error_codes {
    ($($variant:ident => ($status:ident, $code:literal, $message:literal),)+) => {
        /// Closed registry of business error codes
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($variant,)+
        }

        impl ErrorCode {
            /// Every registered code in declaration order
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant,)+];

            /// HTTP status returned for this code
            pub fn status(&self) -> HttpStatus {
                match self {
                    $(ErrorCode::$variant => HttpStatus::$status,)+
                }
            }

            /// Short business code, e.g. `T001`
            pub fn code(&self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $code,)+
                }
            }

            /// Default human readable message
            pub fn message(&self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $message,)+
                }
            }
        }
    };
}

error_codes! {
    // User
    UserNotFound => (NotFound, "U001", "사용자를 찾을 수 없습니다"),
    UserAlreadyExists => (Conflict, "U002", "이미 존재하는 사용자입니다"),
    UserInactive => (Forbidden, "U003", "비활성화된 사용자입니다"),
    UserEmailAlreadyExists => (Conflict, "U004", "이미 존재하는 이메일입니다"),
    UserPasswordMismatch => (BadRequest, "U005", "비밀번호가 일치하지 않습니다"),

    // Member
    MemberNotFound => (NotFound, "M001", "회원을 찾을 수 없습니다"),
    MemberAlreadyExists => (Conflict, "M002", "이미 존재하는 회원입니다"),
    MemberInactive => (Forbidden, "M003", "비활성화된 회원입니다"),
    MemberRoleNotFound => (NotFound, "M004", "회원 역할을 찾을 수 없습니다"),
    MemberRoleAlreadyExists => (Conflict, "M005", "이미 존재하는 회원 역할입니다"),

    // Role
    RoleNotFound => (NotFound, "R001", "역할을 찾을 수 없습니다"),
    RoleAlreadyExists => (Conflict, "R002", "이미 존재하는 역할입니다"),
    RoleInUse => (Conflict, "R003", "사용 중인 역할은 삭제할 수 없습니다"),

    // Todo
    TodoNotFound => (NotFound, "T001", "할일을 찾을 수 없습니다"),
    TodoAlreadyExists => (Conflict, "T002", "이미 존재하는 할일입니다"),
    TodoAlreadyCompleted => (Conflict, "T003", "이미 완료된 할일입니다"),
    TodoNotCompleted => (Conflict, "T004", "완료되지 않은 할일입니다"),
    TodoAccessDenied => (Forbidden, "T005", "할일에 접근할 권한이 없습니다"),

    // Product
    ProductNotFound => (NotFound, "P001", "상품을 찾을 수 없습니다"),
    ProductAlreadyExists => (Conflict, "P002", "이미 존재하는 상품입니다"),
    ProductOutOfStock => (Conflict, "P003", "재고가 부족합니다"),
    ProductPriceInvalid => (BadRequest, "P004", "잘못된 상품 가격입니다"),
    ProductCategoryInvalid => (BadRequest, "P005", "잘못된 상품 카테고리입니다"),

    // Sample
    SampleNotFound => (NotFound, "S001", "샘플을 찾을 수 없습니다"),
    SampleAlreadyExists => (Conflict, "S002", "이미 존재하는 샘플입니다"),

    // Common
    InvalidInputValue => (BadRequest, "C001", "잘못된 입력값입니다"),
    ValidationFailed => (BadRequest, "C002", "입력값 검증에 실패했습니다"),
    ResourceNotFound => (NotFound, "C003", "요청한 리소스를 찾을 수 없습니다"),
    DuplicateResource => (Conflict, "C004", "중복된 리소스입니다"),
    InvalidRequestFormat => (BadRequest, "C005", "잘못된 요청 형식입니다"),
    MissingRequiredParameter => (BadRequest, "C006", "필수 파라미터가 누락되었습니다"),

    // Auth
    AuthenticationFailed => (Unauthorized, "A001", "인증에 실패했습니다"),
    AccessDenied => (Forbidden, "A002", "접근 권한이 없습니다"),
    TokenExpired => (Unauthorized, "A003", "토큰이 만료되었습니다"),
    TokenInvalid => (Unauthorized, "A004", "유효하지 않은 토큰입니다"),
    TokenMissing => (Unauthorized, "A005", "토큰이 누락되었습니다"),
    RefreshTokenExpired => (Unauthorized, "A006", "리프레시 토큰이 만료되었습니다"),
    RefreshTokenInvalid => (Unauthorized, "A007", "유효하지 않은 리프레시 토큰입니다"),
    InsufficientPrivileges => (Forbidden, "A008", "권한이 부족합니다"),

    // Server
    InternalServerError => (InternalServerError, "E001", "서버 내부 오류가 발생했습니다"),
    ExternalServiceError => (BadGateway, "E002", "외부 서비스 오류가 발생했습니다"),
    DatabaseError => (InternalServerError, "E003", "데이터베이스 오류가 발생했습니다"),
    NetworkError => (ServiceUnavailable, "E004", "네트워크 오류가 발생했습니다"),
    ServiceUnavailable => (ServiceUnavailable, "E005", "서비스를 사용할 수 없습니다"),
    TimeoutError => (RequestTimeout, "E006", "요청 시간이 초과되었습니다"),

    // Business
    BusinessRuleViolation => (Conflict, "B001", "비즈니스 규칙을 위반했습니다"),
    OperationNotAllowed => (Forbidden, "B002", "허용되지 않은 작업입니다"),
    InvalidStateTransition => (Conflict, "B003", "잘못된 상태 변경입니다"),
    QuotaExceeded => (TooManyRequests, "B004", "할당량을 초과했습니다"),
    RateLimitExceeded => (TooManyRequests, "B005", "요청 횟수 제한을 초과했습니다"),
}

impl ErrorCode {
    /// Name of the HTTP status, used as `hscode` in the error block
    pub fn http_status_code(&self) -> &'static str {
        self.status().name()
    }

    /// Look a code up by its short business code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

/// Code reported for request validation failures
pub const VALIDATION_ERROR_CODE: &str = "V001";

/// Messages used by the boundary when request validation fails
pub mod validation_messages {
    /// Top-level message for an invalid request body
    pub const BODY_FAILED: &str = "입력값 검증에 실패했습니다";
    /// Error block message for an invalid request body
    pub const BODY_INVALID: &str = "입력값이 올바르지 않습니다";
    /// Error block details for an invalid request body
    pub const BODY_DETAILS: &str = "필수 필드가 누락되었거나 형식이 올바르지 않습니다";
    /// Top-level and error block message for invalid query or path parameters
    pub const PARAMETER_FAILED: &str = "파라미터 검증에 실패했습니다";
    /// Error block details for invalid query or path parameters
    pub const PARAMETER_DETAILS: &str = "입력값이 올바르지 않습니다";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<&str> = ErrorCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), ErrorCode::ALL.len());
        assert!(!codes.contains(VALIDATION_ERROR_CODE));
    }

    #[test]
    fn test_code_prefix_matches_group() {
        assert_eq!(ErrorCode::TodoNotFound.code(), "T001");
        assert_eq!(ErrorCode::MemberNotFound.code(), "M001");
        assert_eq!(ErrorCode::InternalServerError.code(), "E001");
        for code in ErrorCode::ALL {
            let prefix = code.code().chars().next().unwrap();
            assert!("UMRTPSCAEB".contains(prefix), "unexpected prefix in {}", code.code());
        }
    }

    #[test]
    fn test_http_status_code_is_status_name() {
        assert_eq!(ErrorCode::TodoNotFound.http_status_code(), "NOT_FOUND");
        assert_eq!(ErrorCode::TodoNotFound.status().value(), 404);
        assert_eq!(ErrorCode::QuotaExceeded.http_status_code(), "TOO_MANY_REQUESTS");
        assert_eq!(ErrorCode::TimeoutError.status().value(), 408);
        assert_eq!(ErrorCode::ExternalServiceError.status().value(), 502);
    }

    #[test]
    fn test_every_code_is_an_error_status() {
        for code in ErrorCode::ALL {
            assert!(code.status().value() >= 400, "{} is not an error status", code.code());
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(ErrorCode::from_code("P003"), Some(ErrorCode::ProductOutOfStock));
        assert_eq!(ErrorCode::from_code("Z999"), None);
    }
}
