//! Todo request bodies and query parameters

use mall_core::services::{CreateTodo, UpdateTodo};
use serde::Deserialize;
use validator::Validate;

use super::not_blank;

/// Body of `POST /api/v1/todos`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TodoCreateRequest {
    #[validate(
        required(message = "제목은 필수입니다."),
        custom(function = "not_blank", message = "제목은 필수입니다."),
        length(max = 256, message = "제목은 256자 이하여야 합니다.")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "작성자는 필수입니다."),
        custom(function = "not_blank", message = "작성자는 필수입니다."),
        length(max = 256, message = "작성자는 256자 이하여야 합니다.")
    )]
    pub writer: Option<String>,

    pub complete: Option<bool>,
}

impl From<TodoCreateRequest> for CreateTodo {
    fn from(request: TodoCreateRequest) -> Self {
        CreateTodo {
            title: request.title.unwrap_or_default(),
            writer: request.writer.unwrap_or_default(),
            complete: request.complete.unwrap_or(false),
        }
    }
}

/// Body of `PUT /api/v1/todos/{tno}`; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdateRequest {
    #[validate(length(max = 256, message = "제목은 256자 이하여야 합니다."))]
    pub title: Option<String>,

    #[validate(length(max = 256, message = "작성자는 256자 이하여야 합니다."))]
    pub writer: Option<String>,

    pub complete: Option<bool>,
}

impl From<TodoUpdateRequest> for UpdateTodo {
    fn from(request: TodoUpdateRequest) -> Self {
        UpdateTodo {
            title: request.title,
            writer: request.writer,
            complete: request.complete,
        }
    }
}

/// `GET /api/v1/todos/search?writer&complete`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoSearchParams {
    pub writer: Option<String>,
    pub complete: Option<bool>,
}

/// `GET /api/v1/todos/search/title?title`
#[derive(Debug, Clone, Deserialize)]
pub struct TitleParams {
    pub title: String,
}
