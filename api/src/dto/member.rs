//! Member request bodies

use mall_core::services::{ChangePassword, CreateMember, UpdateMember};
use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreateRequest {
    #[validate(
        required(message = "이메일은 필수입니다"),
        email(message = "올바른 이메일 형식이 아닙니다")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "비밀번호는 필수입니다"),
        length(min = 8, max = 100, message = "비밀번호는 8자 이상 100자 이하여야 합니다")
    )]
    pub password: Option<String>,

    #[validate(
        required(message = "닉네임은 필수입니다"),
        custom(function = "not_blank", message = "닉네임은 필수입니다"),
        length(min = 2, max = 50, message = "닉네임은 2자 이상 50자 이하여야 합니다")
    )]
    pub nickname: Option<String>,

    #[validate(length(max = 500, message = "프로필 이미지 URL은 500자 이하여야 합니다."))]
    pub picture_url: Option<String>,

    pub social: Option<bool>,
}

impl From<MemberCreateRequest> for CreateMember {
    fn from(request: MemberCreateRequest) -> Self {
        CreateMember {
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
            nickname: request.nickname.unwrap_or_default(),
            picture_url: request.picture_url,
            social: request.social.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdateRequest {
    #[validate(length(max = 50, message = "닉네임은 50자 이하여야 합니다."))]
    pub nickname: Option<String>,

    #[validate(length(max = 500, message = "프로필 이미지 URL은 500자 이하여야 합니다."))]
    pub picture_url: Option<String>,

    pub social: Option<bool>,

    pub is_active: Option<bool>,
}

impl From<MemberUpdateRequest> for UpdateMember {
    fn from(request: MemberUpdateRequest) -> Self {
        UpdateMember {
            nickname: request.nickname,
            picture_url: request.picture_url,
            social: request.social,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    #[validate(required(message = "현재 비밀번호는 필수입니다"))]
    pub current_password: Option<String>,

    #[validate(
        required(message = "새 비밀번호는 필수입니다"),
        length(min = 8, max = 100, message = "비밀번호는 8자 이상 100자 이하여야 합니다")
    )]
    pub new_password: Option<String>,
}

impl From<PasswordChangeRequest> for ChangePassword {
    fn from(request: PasswordChangeRequest) -> Self {
        ChangePassword {
            current_password: request.current_password.unwrap_or_default(),
            new_password: request.new_password.unwrap_or_default(),
        }
    }
}
