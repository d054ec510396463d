//! Role request bodies

use mall_core::services::{CreateRole, UpdateRole};
use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleCreateRequest {
    #[validate(
        required(message = "역할명은 필수입니다"),
        custom(function = "not_blank", message = "역할명은 필수입니다"),
        length(min = 2, max = 50, message = "역할명은 2자 이상 50자 이하로 입력해주세요")
    )]
    pub role_name: Option<String>,

    #[validate(length(max = 200, message = "역할 설명은 200자 이하로 입력해주세요"))]
    pub description: Option<String>,
}

impl From<RoleCreateRequest> for CreateRole {
    fn from(request: RoleCreateRequest) -> Self {
        CreateRole {
            role_name: request.role_name.unwrap_or_default(),
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdateRequest {
    #[validate(length(min = 2, max = 50, message = "역할명은 2자 이상 50자 이하로 입력해주세요"))]
    pub role_name: Option<String>,

    #[validate(length(max = 200, message = "역할 설명은 200자 이하로 입력해주세요"))]
    pub description: Option<String>,
}

impl From<RoleUpdateRequest> for UpdateRole {
    fn from(request: RoleUpdateRequest) -> Self {
        UpdateRole {
            role_name: request.role_name,
            description: request.description,
        }
    }
}
