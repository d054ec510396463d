//! In-memory implementation of TodoRepository

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::RwLock;

use mall_shared::{Page, PageQuery, Sort};

use super::{TodoFilter, TodoRepository};
use crate::domain::entities::Todo;
use crate::errors::DomainError;
use crate::repositories::sort_records;

/// Todo repository backed by a process-local map
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<BTreeMap<i64, Todo>>>,
    next_id: AtomicI64,
}

impl InMemoryTodoRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            todos: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    async fn matching(&self, filter: &TodoFilter, sort: &Sort) -> Vec<Todo> {
        let todos = self.todos.read().await;
        let mut matched: Vec<Todo> = todos.values().filter(|t| filter.matches(t)).cloned().collect();
        sort_records(&mut matched, sort, compare_todos);
        matched
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_todos(a: &Todo, b: &Todo, field: &str) -> Ordering {
    match field {
        "tno" => a.tno.cmp(&b.tno),
        "title" => a.title.cmp(&b.title),
        "writer" => a.writer.cmp(&b.writer),
        "complete" => a.complete.cmp(&b.complete),
        "createdAt" => a.audit.created_at.cmp(&b.audit.created_at),
        "updatedAt" => a.audit.updated_at.cmp(&b.audit.updated_at),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn save(&self, mut todo: Todo) -> Result<Todo, DomainError> {
        todo.tno = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let mut todos = self.todos.write().await;
        todos.insert(todo.tno, todo.clone());
        Ok(todo)
    }

    async fn update(&self, todo: &Todo) -> Result<bool, DomainError> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&todo.tno) {
            Some(stored) => {
                *stored = todo.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, tno: i64) -> Result<Option<Todo>, DomainError> {
        let todos = self.todos.read().await;
        Ok(todos.get(&tno).cloned())
    }

    async fn delete_by_id(&self, tno: i64) -> Result<bool, DomainError> {
        let mut todos = self.todos.write().await;
        Ok(todos.remove(&tno).is_some())
    }

    async fn find_page(&self, filter: &TodoFilter, query: &PageQuery) -> Result<Page<Todo>, DomainError> {
        Ok(query.paginate(self.matching(filter, &query.sort).await))
    }

    async fn find_list(&self, filter: &TodoFilter, sort: &Sort) -> Result<Vec<Todo>, DomainError> {
        Ok(self.matching(filter, sort).await)
    }

    async fn count(&self, filter: &TodoFilter) -> Result<u64, DomainError> {
        let todos = self.todos.read().await;
        Ok(todos.values().filter(|t| filter.matches(t)).count() as u64)
    }

    async fn delete_matching(&self, filter: &TodoFilter) -> Result<u64, DomainError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|_, t| !filter.matches(t));
        Ok((before - todos.len()) as u64)
    }
}
