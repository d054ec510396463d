//! MySQL implementation of the RoleRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use mall_core::domain::entities::Role;
use mall_core::errors::DomainError;
use mall_core::repositories::{RoleFilter, RoleRepository};
use mall_shared::{ErrorCode, Page, PageQuery, Sort};

use super::{
    audit_from_row, bind_audit, bind_touch, column, db_error, is_unique_violation, push_limit, push_order_by,
    AUDIT_ASSIGNMENTS, AUDIT_COLUMNS, AUDIT_PLACEHOLDERS,
};

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("roleName", "role_name"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// MySQL implementation of RoleRepository
pub struct MySqlRoleRepository {
    pool: MySqlPool,
}

impl MySqlRoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_role(row: &MySqlRow) -> Result<Role, DomainError> {
        Ok(Role {
            id: column(row, "id")?,
            role_name: column(row, "role_name")?,
            description: column(row, "description")?,
            audit: audit_from_row(row)?,
        })
    }

    fn select() -> QueryBuilder<'static, MySql> {
        QueryBuilder::new(format!("SELECT id, role_name, description, {} FROM roles", AUDIT_COLUMNS))
    }

    fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &RoleFilter) {
        builder.push(" WHERE 1 = 1");
        if !filter.include_deleted {
            builder.push(" AND deleted = FALSE");
        }
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", keyword.to_lowercase());
            builder
                .push(" AND (LOWER(role_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(description) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    async fn fetch_optional(&self, mut builder: QueryBuilder<'_, MySql>) -> Result<Option<Role>, DomainError> {
        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        row.as_ref().map(Self::row_to_role).transpose()
    }
}

#[async_trait]
impl RoleRepository for MySqlRoleRepository {
    async fn save(&self, mut role: Role) -> Result<Role, DomainError> {
        let query = format!(
            "INSERT INTO roles (role_name, description, {}) VALUES (?, ?, {})",
            AUDIT_COLUMNS, AUDIT_PLACEHOLDERS
        );
        let result = bind_audit(
            sqlx::query(&query).bind(&role.role_name).bind(&role.description),
            &role.audit,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::custom(ErrorCode::RoleAlreadyExists).with_details(role.role_name.clone())
            } else {
                db_error(e)
            }
        })?;

        role.id = result.last_insert_id() as i64;
        Ok(role)
    }

    async fn update(&self, role: &Role) -> Result<bool, DomainError> {
        let query = format!(
            "UPDATE roles SET role_name = ?, description = ?, {} WHERE id = ?",
            AUDIT_ASSIGNMENTS
        );
        let result = bind_touch(
            sqlx::query(&query).bind(&role.role_name).bind(&role.description),
            &role.audit,
        )
        .bind(role.id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, DomainError> {
        let mut builder = Self::select();
        builder.push(" WHERE id = ").push_bind(id);
        self.fetch_optional(builder).await
    }

    async fn find_by_name(&self, role_name: &str) -> Result<Option<Role>, DomainError> {
        let mut builder = Self::select();
        builder.push(" WHERE role_name = ").push_bind(role_name.to_string());
        self.fetch_optional(builder).await
    }

    async fn exists_by_name(&self, role_name: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE role_name = ?")
            .bind(role_name)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }

    async fn find_page(&self, filter: &RoleFilter, query: &PageQuery) -> Result<Page<Role>, DomainError> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM roles");
        Self::push_filter(&mut count_builder, filter);
        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        let mut builder = Self::select();
        Self::push_filter(&mut builder, filter);
        push_order_by(&mut builder, &query.sort, SORT_COLUMNS, "id ASC");
        push_limit(&mut builder, query);
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        let roles = rows.iter().map(Self::row_to_role).collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(roles, query, total as u64))
    }

    async fn find_list(&self, filter: &RoleFilter, sort: &Sort) -> Result<Vec<Role>, DomainError> {
        let mut builder = Self::select();
        Self::push_filter(&mut builder, filter);
        push_order_by(&mut builder, sort, SORT_COLUMNS, "id ASC");
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        rows.iter().map(Self::row_to_role).collect()
    }
}
