//! MySQL implementation of the TodoRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use mall_core::domain::entities::Todo;
use mall_core::errors::DomainError;
use mall_core::repositories::{TodoFilter, TodoRepository};
use mall_shared::{Page, PageQuery, Sort};

use super::{
    audit_from_row, bind_audit, bind_touch, column, db_error, push_limit, push_order_by, AUDIT_ASSIGNMENTS,
    AUDIT_COLUMNS, AUDIT_PLACEHOLDERS,
};

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("tno", "tno"),
    ("title", "title"),
    ("writer", "writer"),
    ("complete", "complete"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// MySQL implementation of TodoRepository
pub struct MySqlTodoRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTodoRepository {
    /// Create a new MySQL todo repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Todo entity
    fn row_to_todo(row: &MySqlRow) -> Result<Todo, DomainError> {
        Ok(Todo {
            tno: column(row, "tno")?,
            title: column(row, "title")?,
            writer: column(row, "writer")?,
            complete: column(row, "complete")?,
            audit: audit_from_row(row)?,
        })
    }

    fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &TodoFilter) {
        builder.push(" WHERE deleted = FALSE");
        if let Some(writer) = &filter.writer {
            builder.push(" AND writer = ").push_bind(writer.clone());
        }
        if let Some(complete) = filter.complete {
            builder.push(" AND complete = ").push_bind(complete);
        }
        if let Some(title) = &filter.title {
            builder
                .push(" AND LOWER(title) LIKE ")
                .push_bind(format!("%{}%", title.to_lowercase()));
        }
    }

    fn select() -> QueryBuilder<'static, MySql> {
        QueryBuilder::new(format!("SELECT tno, title, writer, complete, {} FROM todos", AUDIT_COLUMNS))
    }
}

#[async_trait]
impl TodoRepository for MySqlTodoRepository {
    async fn save(&self, mut todo: Todo) -> Result<Todo, DomainError> {
        let query = format!(
            "INSERT INTO todos (title, writer, complete, {}) VALUES (?, ?, ?, {})",
            AUDIT_COLUMNS, AUDIT_PLACEHOLDERS
        );
        let result = bind_audit(
            sqlx::query(&query).bind(&todo.title).bind(&todo.writer).bind(todo.complete),
            &todo.audit,
        )
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        todo.tno = result.last_insert_id() as i64;
        Ok(todo)
    }

    async fn update(&self, todo: &Todo) -> Result<bool, DomainError> {
        let query = format!(
            "UPDATE todos SET title = ?, writer = ?, complete = ?, {} WHERE tno = ?",
            AUDIT_ASSIGNMENTS
        );
        let result = bind_touch(
            sqlx::query(&query).bind(&todo.title).bind(&todo.writer).bind(todo.complete),
            &todo.audit,
        )
        .bind(todo.tno)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, tno: i64) -> Result<Option<Todo>, DomainError> {
        let mut builder = Self::select();
        builder.push(" WHERE tno = ").push_bind(tno);
        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn delete_by_id(&self, tno: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM todos WHERE tno = ?")
            .bind(tno)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_page(&self, filter: &TodoFilter, query: &PageQuery) -> Result<Page<Todo>, DomainError> {
        let total = self.count(filter).await?;

        let mut builder = Self::select();
        Self::push_filter(&mut builder, filter);
        push_order_by(&mut builder, &query.sort, SORT_COLUMNS, "tno DESC");
        push_limit(&mut builder, query);
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        let todos = rows.iter().map(Self::row_to_todo).collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(todos, query, total))
    }

    async fn find_list(&self, filter: &TodoFilter, sort: &Sort) -> Result<Vec<Todo>, DomainError> {
        let mut builder = Self::select();
        Self::push_filter(&mut builder, filter);
        push_order_by(&mut builder, sort, SORT_COLUMNS, "tno DESC");
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn count(&self, filter: &TodoFilter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        Self::push_filter(&mut builder, filter);
        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }

    async fn delete_matching(&self, filter: &TodoFilter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new("DELETE FROM todos");
        Self::push_filter(&mut builder, filter);
        let result = builder.build().execute(&self.pool).await.map_err(db_error)?;

        tracing::debug!(removed = result.rows_affected(), "Todos deleted by filter");
        Ok(result.rows_affected())
    }
}
