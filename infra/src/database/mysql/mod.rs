//! MySQL implementations of the core repository traits.
//!
//! Every table carries the same audit columns; the helpers here bind and
//! read them so each repository only deals with its own fields.

mod cart_repository;
mod member_repository;
mod product_repository;
mod role_repository;
mod todo_repository;

pub use cart_repository::{MySqlCartItemRepository, MySqlCartRepository};
pub use member_repository::MySqlMemberRepository;
pub use product_repository::MySqlProductRepository;
pub use role_repository::MySqlRoleRepository;
pub use todo_repository::MySqlTodoRepository;

use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, QueryBuilder, Row};

use mall_core::domain::entities::{Actor, AuditFields};
use mall_core::errors::DomainError;
use mall_shared::{ErrorCode, PageQuery, Sort};

/// Audit columns in insert order
pub(crate) const AUDIT_COLUMNS: &str =
    "created_at, updated_at, created_by, created_by_nickname, updated_by, updated_by_nickname, deleted";

/// Placeholders matching [`AUDIT_COLUMNS`]
pub(crate) const AUDIT_PLACEHOLDERS: &str = "?, ?, ?, ?, ?, ?, ?";

/// Assignments for the writable audit columns, bound by [`bind_touch`]
pub(crate) const AUDIT_ASSIGNMENTS: &str =
    "updated_at = ?, updated_by = ?, updated_by_nickname = ?, deleted = ?";

pub(crate) type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Map a SQLx failure into the domain's database error
pub(crate) fn db_error(e: sqlx::Error) -> DomainError {
    tracing::error!("Database operation failed: {}", e);
    DomainError::custom(ErrorCode::DatabaseError).with_source(e)
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Read one column, mapping decode failures into the domain error
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name).map_err(db_error)
}

/// Bind every audit column, in [`AUDIT_COLUMNS`] order
pub(crate) fn bind_audit<'q>(query: MySqlQuery<'q>, audit: &'q AuditFields) -> MySqlQuery<'q> {
    query
        .bind(audit.created_at)
        .bind(audit.updated_at)
        .bind(audit.created_by.as_ref().map(|a| a.email.as_str()))
        .bind(audit.created_by.as_ref().map(|a| a.nickname.as_str()))
        .bind(audit.updated_by.as_ref().map(|a| a.email.as_str()))
        .bind(audit.updated_by.as_ref().map(|a| a.nickname.as_str()))
        .bind(audit.deleted)
}

/// Bind the columns of [`AUDIT_ASSIGNMENTS`]
pub(crate) fn bind_touch<'q>(query: MySqlQuery<'q>, audit: &'q AuditFields) -> MySqlQuery<'q> {
    query
        .bind(audit.updated_at)
        .bind(audit.updated_by.as_ref().map(|a| a.email.as_str()))
        .bind(audit.updated_by.as_ref().map(|a| a.nickname.as_str()))
        .bind(audit.deleted)
}

pub(crate) fn audit_from_row(row: &MySqlRow) -> Result<AuditFields, DomainError> {
    Ok(AuditFields {
        created_by: actor(column(row, "created_by")?, column(row, "created_by_nickname")?),
        updated_by: actor(column(row, "updated_by")?, column(row, "updated_by_nickname")?),
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
        deleted: column(row, "deleted")?,
    })
}

fn actor(email: Option<String>, nickname: Option<String>) -> Option<Actor> {
    email.map(|email| Actor::new(email, nickname.unwrap_or_default()))
}

/// Append `ORDER BY`, translating API sort fields through `columns`.
///
/// Unknown fields are skipped; `fallback` is used when none remain.
pub(crate) fn push_order_by(
    builder: &mut QueryBuilder<'_, MySql>,
    sort: &Sort,
    columns: &[(&str, &str)],
    fallback: &str,
) {
    let clauses: Vec<String> = sort
        .iter()
        .filter_map(|params| {
            columns
                .iter()
                .find(|(field, _)| *field == params.field)
                .map(|(_, column)| format!("{} {}", column, if params.is_desc() { "DESC" } else { "ASC" }))
        })
        .collect();

    builder.push(" ORDER BY ");
    if clauses.is_empty() {
        builder.push(fallback);
    } else {
        builder.push(clauses.join(", "));
    }
}

pub(crate) fn push_limit(builder: &mut QueryBuilder<'_, MySql>, query: &PageQuery) {
    builder
        .push(" LIMIT ")
        .push_bind(query.limit() as i64)
        .push(" OFFSET ")
        .push_bind(query.offset() as i64);
}
