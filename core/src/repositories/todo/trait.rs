//! Todo repository trait defining the interface for todo persistence.

use async_trait::async_trait;
use mall_shared::{Page, PageQuery, Sort};

use crate::domain::entities::Todo;
use crate::errors::DomainError;
use crate::repositories::contains_ignore_case;

/// Criteria narrowing a todo query; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Exact writer
    pub writer: Option<String>,
    pub complete: Option<bool>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
}

impl TodoFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn writer(writer: impl Into<String>) -> Self {
        Self {
            writer: Some(writer.into()),
            ..Default::default()
        }
    }

    pub fn complete(complete: bool) -> Self {
        Self {
            complete: Some(complete),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_complete(mut self, complete: Option<bool>) -> Self {
        self.complete = complete;
        self
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.writer.as_ref().map_or(true, |w| &todo.writer == w)
            && self.complete.map_or(true, |c| todo.complete == c)
            && self
                .title
                .as_ref()
                .map_or(true, |t| contains_ignore_case(&todo.title, t))
    }
}

/// Repository trait for Todo entity persistence operations
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a new todo
    ///
    /// # Arguments
    /// * `todo` - The todo to insert; its `tno` is ignored
    ///
    /// # Returns
    /// * The stored todo with its generated `tno`
    async fn save(&self, todo: Todo) -> Result<Todo, DomainError>;

    /// Overwrite an existing todo
    ///
    /// # Returns
    /// * `Ok(false)` if no todo with that `tno` exists
    async fn update(&self, todo: &Todo) -> Result<bool, DomainError>;

    /// Find a todo by its number
    async fn find_by_id(&self, tno: i64) -> Result<Option<Todo>, DomainError>;

    /// Remove a todo permanently
    ///
    /// # Returns
    /// * `Ok(true)` if a todo was removed
    async fn delete_by_id(&self, tno: i64) -> Result<bool, DomainError>;

    /// One page of todos matching the filter, ordered by `query.sort`
    async fn find_page(&self, filter: &TodoFilter, query: &PageQuery) -> Result<Page<Todo>, DomainError>;

    /// Every todo matching the filter, ordered by `sort`
    async fn find_list(&self, filter: &TodoFilter, sort: &Sort) -> Result<Vec<Todo>, DomainError>;

    /// Count todos matching the filter
    async fn count(&self, filter: &TodoFilter) -> Result<u64, DomainError>;

    /// Remove every todo matching the filter
    ///
    /// # Returns
    /// * Number of removed todos
    async fn delete_matching(&self, filter: &TodoFilter) -> Result<u64, DomainError>;
}
