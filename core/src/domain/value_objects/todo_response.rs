use serde::{Deserialize, Serialize};

use super::audit_dto::{map_audit, AuditDto};
use crate::domain::entities::Todo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub tno: i64,
    pub title: String,
    pub writer: String,
    pub complete: bool,
    /// "완료" or "미완료"
    pub complete_status: String,
    #[serde(flatten)]
    pub audit: AuditDto,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            tno: todo.tno,
            title: todo.title.clone(),
            writer: todo.writer.clone(),
            complete: todo.complete,
            complete_status: if todo.complete { "완료" } else { "미완료" }.to_string(),
            audit: map_audit(todo),
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}
