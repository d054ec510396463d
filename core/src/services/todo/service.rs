//! Todo service: CRUD, search and counting over todos.

use std::sync::Arc;

use mall_shared::{ErrorCode, PageQuery, PageResponse, Sort, SortParams};

use crate::domain::entities::{AuditContext, AuditFields, Auditable, Todo};
use crate::domain::value_objects::TodoResponse;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{TodoFilter, TodoRepository};

/// Fields a todo listing may be sorted by
pub const TODO_SORT_FIELDS: &[&str] = &["tno", "title", "writer", "complete", "createdAt", "updatedAt"];

/// Newest first
pub fn default_todo_sort() -> Sort {
    Sort::by(SortParams::desc("tno"))
}

/// Configuration for the todo service
#[derive(Debug, Clone)]
pub struct TodoServiceConfig {
    /// Number of entries returned by [`TodoService::recently_completed`] when no limit is given
    pub recent_completed_limit: usize,
}

impl Default for TodoServiceConfig {
    fn default() -> Self {
        Self {
            recent_completed_limit: 10,
        }
    }
}

/// Input for creating a todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    pub writer: String,
    pub complete: bool,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub writer: Option<String>,
    pub complete: Option<bool>,
}

/// Service for managing todos
pub struct TodoService<R>
where
    R: TodoRepository,
{
    repository: Arc<R>,
    config: TodoServiceConfig,
}

impl<R> TodoService<R>
where
    R: TodoRepository + 'static,
{
    /// Create a new todo service
    pub fn new(repository: Arc<R>, config: TodoServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Create a todo
    ///
    /// # Arguments
    /// * `ctx` - Acting member, recorded as creator
    /// * `request` - Title, writer and initial completion flag
    pub async fn create(&self, ctx: &AuditContext, request: CreateTodo) -> DomainResult<TodoResponse> {
        let todo = Todo::new(
            request.title.trim(),
            request.writer.trim(),
            request.complete,
            AuditFields::created(ctx),
        );
        let saved = self.repository.save(todo).await?;
        tracing::info!(tno = saved.tno, writer = %saved.writer, "Todo created");
        Ok(TodoResponse::from(&saved))
    }

    /// Fetch one todo
    ///
    /// # Errors
    /// * T001 when no todo has that number
    pub async fn get(&self, tno: i64) -> DomainResult<TodoResponse> {
        Ok(TodoResponse::from(&self.find_existing(tno).await?))
    }

    /// Apply a partial update
    pub async fn update(&self, ctx: &AuditContext, tno: i64, request: UpdateTodo) -> DomainResult<TodoResponse> {
        let mut todo = self.find_existing(tno).await?;
        todo.update_todo(request.title.as_deref(), request.writer.as_deref(), request.complete);
        todo.touch(ctx);
        self.store(&todo).await?;
        tracing::info!(tno, "Todo updated");
        Ok(TodoResponse::from(&todo))
    }

    /// Remove a todo permanently
    pub async fn delete(&self, tno: i64) -> DomainResult<()> {
        if !self.repository.delete_by_id(tno).await? {
            return Err(not_found(tno));
        }
        tracing::info!(tno, "Todo deleted");
        Ok(())
    }

    /// Flip the completion flag
    pub async fn toggle(&self, ctx: &AuditContext, tno: i64) -> DomainResult<TodoResponse> {
        let mut todo = self.find_existing(tno).await?;
        todo.toggle_complete();
        todo.touch(ctx);
        self.store(&todo).await?;
        tracing::debug!(tno, complete = todo.complete, "Todo toggled");
        Ok(TodoResponse::from(&todo))
    }

    pub async fn list(&self, query: &PageQuery) -> DomainResult<PageResponse<TodoResponse>> {
        self.page(&TodoFilter::all(), query).await
    }

    pub async fn list_by_writer(&self, writer: &str, query: &PageQuery) -> DomainResult<PageResponse<TodoResponse>> {
        self.page(&TodoFilter::writer(writer), query).await
    }

    pub async fn list_by_complete(&self, complete: bool, query: &PageQuery) -> DomainResult<PageResponse<TodoResponse>> {
        self.page(&TodoFilter::complete(complete), query).await
    }

    /// Filter by writer and/or completion; absent criteria match everything
    pub async fn search(
        &self,
        writer: Option<&str>,
        complete: Option<bool>,
        query: &PageQuery,
    ) -> DomainResult<PageResponse<TodoResponse>> {
        let filter = TodoFilter {
            writer: writer.map(str::to_string),
            complete,
            title: None,
        };
        self.page(&filter, query).await
    }

    /// Case-insensitive title substring search
    pub async fn search_by_title(&self, title: &str, query: &PageQuery) -> DomainResult<PageResponse<TodoResponse>> {
        self.page(&TodoFilter::title(title), query).await
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.repository.count(&TodoFilter::all()).await
    }

    pub async fn count_by_writer(&self, writer: &str) -> DomainResult<u64> {
        self.repository.count(&TodoFilter::writer(writer)).await
    }

    pub async fn count_by_complete(&self, complete: bool) -> DomainResult<u64> {
        self.repository.count(&TodoFilter::complete(complete)).await
    }

    pub async fn completed_count_by_writer(&self, writer: &str) -> DomainResult<u64> {
        self.repository
            .count(&TodoFilter::writer(writer).with_complete(Some(true)))
            .await
    }

    pub async fn incomplete_count_by_writer(&self, writer: &str) -> DomainResult<u64> {
        self.repository
            .count(&TodoFilter::writer(writer).with_complete(Some(false)))
            .await
    }

    /// Remove every todo
    ///
    /// # Returns
    /// * Number of removed todos
    pub async fn delete_all(&self) -> DomainResult<u64> {
        let removed = self.repository.delete_matching(&TodoFilter::all()).await?;
        tracing::warn!(removed, "All todos deleted");
        Ok(removed)
    }

    pub async fn delete_by_writer(&self, writer: &str) -> DomainResult<u64> {
        let removed = self.repository.delete_matching(&TodoFilter::writer(writer)).await?;
        tracing::info!(removed, writer, "Todos deleted by writer");
        Ok(removed)
    }

    /// Every todo, newest first
    pub async fn list_all(&self) -> DomainResult<Vec<TodoResponse>> {
        self.collect(&TodoFilter::all(), &default_todo_sort()).await
    }

    pub async fn list_all_by_writer(&self, writer: &str) -> DomainResult<Vec<TodoResponse>> {
        self.collect(&TodoFilter::writer(writer), &default_todo_sort()).await
    }

    /// Completed todos ordered by their last update, most recent first
    pub async fn recently_completed(&self, limit: Option<usize>) -> DomainResult<Vec<TodoResponse>> {
        let limit = limit.unwrap_or(self.config.recent_completed_limit);
        let mut todos = self
            .collect(&TodoFilter::complete(true), &Sort::by(SortParams::desc("updatedAt")))
            .await?;
        todos.truncate(limit);
        Ok(todos)
    }

    async fn page(&self, filter: &TodoFilter, query: &PageQuery) -> DomainResult<PageResponse<TodoResponse>> {
        let page = self.repository.find_page(filter, query).await?;
        Ok(PageResponse::from_page(page, TodoResponse::from))
    }

    async fn collect(&self, filter: &TodoFilter, sort: &Sort) -> DomainResult<Vec<TodoResponse>> {
        let todos = self.repository.find_list(filter, sort).await?;
        Ok(todos.iter().map(TodoResponse::from).collect())
    }

    async fn find_existing(&self, tno: i64) -> DomainResult<Todo> {
        self.repository
            .find_by_id(tno)
            .await?
            .ok_or_else(|| not_found(tno))
    }

    async fn store(&self, todo: &Todo) -> DomainResult<()> {
        if self.repository.update(todo).await? {
            Ok(())
        } else {
            Err(not_found(todo.tno))
        }
    }
}

fn not_found(tno: i64) -> DomainError {
    DomainError::business(ErrorCode::TodoNotFound)
        .with_details(format!("할일번호 {}에 해당하는 할일을 찾을 수 없습니다.", tno))
}
