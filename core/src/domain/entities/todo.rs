//! Todo entity

use serde::{Deserialize, Serialize};

use super::audit::{AuditFields, Auditable};

/// Maximum length of a todo title or writer
pub const TODO_TEXT_MAX_LEN: usize = 256;

/// A single todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier, 0 until the record is first saved
    pub tno: i64,
    pub title: String,
    pub writer: String,
    pub complete: bool,
    pub audit: AuditFields,
}

impl Todo {
    pub fn new(title: impl Into<String>, writer: impl Into<String>, complete: bool, audit: AuditFields) -> Self {
        Self {
            tno: 0,
            title: title.into(),
            writer: writer.into(),
            complete,
            audit,
        }
    }

    pub fn mark_as_completed(&mut self) {
        self.complete = true;
    }

    pub fn mark_as_incomplete(&mut self) {
        self.complete = false;
    }

    /// Replace the title; blank values are ignored and the rest is trimmed
    pub fn update_title(&mut self, title: &str) {
        if let Some(title) = non_blank(title) {
            self.title = title;
        }
    }

    /// Replace the writer; blank values are ignored and the rest is trimmed
    pub fn update_writer(&mut self, writer: &str) {
        if let Some(writer) = non_blank(writer) {
            self.writer = writer;
        }
    }

    pub fn toggle_complete(&mut self) {
        self.complete = !self.complete;
    }

    pub fn is_completed(&self) -> bool {
        self.complete
    }

    /// Apply a partial update; `None` leaves the field unchanged
    pub fn update_todo(&mut self, title: Option<&str>, writer: Option<&str>, complete: Option<bool>) {
        if let Some(title) = title {
            self.update_title(title);
        }
        if let Some(writer) = writer {
            self.update_writer(writer);
        }
        if let Some(complete) = complete {
            self.complete = complete;
        }
    }
}

impl Auditable for Todo {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo() -> Todo {
        Todo::new("장보기", "김개발", false, AuditFields::default())
    }

    #[test]
    fn test_new_todo_is_incomplete() {
        let todo = todo();
        assert_eq!(todo.tno, 0);
        assert!(!todo.is_completed());
    }

    #[test]
    fn test_mark_and_toggle() {
        let mut todo = todo();
        todo.mark_as_completed();
        assert!(todo.is_completed());
        todo.mark_as_incomplete();
        assert!(!todo.is_completed());

        todo.toggle_complete();
        todo.toggle_complete();
        assert!(!todo.is_completed());
    }

    #[test]
    fn test_update_title_trims_and_ignores_blank() {
        let mut todo = todo();
        todo.update_title("  청소하기  ");
        assert_eq!(todo.title, "청소하기");
        todo.update_title("   ");
        assert_eq!(todo.title, "청소하기");
    }

    #[test]
    fn test_update_todo_partial() {
        let mut todo = todo();
        todo.update_todo(None, Some(" 이프로 "), Some(true));
        assert_eq!(todo.title, "장보기");
        assert_eq!(todo.writer, "이프로");
        assert!(todo.complete);
    }

    #[test]
    fn test_soft_delete_contract() {
        use crate::domain::entities::audit::AuditContext;

        let mut todo = todo();
        todo.soft_delete(&AuditContext::system());
        assert!(todo.is_deleted());
        todo.restore(&AuditContext::system());
        assert!(!todo.is_deleted());
    }
}
