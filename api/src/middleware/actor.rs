//! Extraction of the acting member for audit stamping
//!
//! Authentication happens in front of this service; the gateway forwards
//! the authenticated member as `X-Member-Email` / `X-Member-Nickname`.
//! Requests without them are audited as anonymous.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::HeaderValue, FromRequest, HttpRequest};
use mall_core::domain::entities::{Actor, AuditContext};

pub const MEMBER_EMAIL_HEADER: &str = "x-member-email";
pub const MEMBER_NICKNAME_HEADER: &str = "x-member-nickname";

/// Audit context for the current request
#[derive(Debug, Clone)]
pub struct CurrentActor(pub AuditContext);

impl CurrentActor {
    pub fn context(&self) -> &AuditContext {
        &self.0
    }

    pub fn from_request_headers(req: &HttpRequest) -> Self {
        let email = header_text(req.headers().get(MEMBER_EMAIL_HEADER));
        let nickname = header_text(req.headers().get(MEMBER_NICKNAME_HEADER));

        let actor = email.map(|email| {
            let nickname = nickname.unwrap_or_else(|| {
                email.split('@').next().unwrap_or_default().to_string()
            });
            Actor::new(email, nickname)
        });
        CurrentActor(AuditContext::new(actor))
    }
}

impl FromRequest for CurrentActor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_request_headers(req)))
    }
}

/// Header text, accepting raw UTF-8 for non-ASCII nicknames
fn header_text(value: Option<&HeaderValue>) -> Option<String> {
    let value = value?;
    let text = match value.to_str() {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_actor_from_headers() {
        let req = TestRequest::default()
            .insert_header((MEMBER_EMAIL_HEADER, "user1@mall.com"))
            .insert_header((MEMBER_NICKNAME_HEADER, HeaderValue::from_bytes("유저1".as_bytes()).unwrap()))
            .to_http_request();
        let actor = CurrentActor::from_request_headers(&req);
        let actor = actor.context().actor().unwrap();
        assert_eq!(actor.email, "user1@mall.com");
        assert_eq!(actor.nickname, "유저1");
    }

    #[test]
    fn test_nickname_defaults_to_local_part() {
        let req = TestRequest::default()
            .insert_header((MEMBER_EMAIL_HEADER, "manager@mall.com"))
            .to_http_request();
        let actor = CurrentActor::from_request_headers(&req);
        assert_eq!(actor.context().actor().unwrap().nickname, "manager");
    }

    #[test]
    fn test_missing_headers_are_anonymous() {
        let req = TestRequest::default().to_http_request();
        assert!(CurrentActor::from_request_headers(&req).context().actor().is_none());
    }
}
