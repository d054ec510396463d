//! MySQL implementation of the MemberRepository trait.
//!
//! Roles are stored one row per grant in `member_roles`.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use mall_core::domain::entities::{Member, MemberRole};
use mall_core::errors::DomainError;
use mall_core::repositories::{MemberFilter, MemberRepository};
use mall_shared::{ErrorCode, Page, PageQuery};

use super::{
    audit_from_row, bind_audit, bind_touch, column, db_error, is_unique_violation, push_limit, push_order_by,
    AUDIT_ASSIGNMENTS, AUDIT_COLUMNS, AUDIT_PLACEHOLDERS,
};

const MEMBER_COLUMNS: &str = "id, email, nickname, password, picture_url, provider, provider_id, social, is_active";

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("email", "email"),
    ("nickname", "nickname"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// MySQL implementation of MemberRepository
pub struct MySqlMemberRepository {
    pool: MySqlPool,
}

impl MySqlMemberRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Member entity, without roles
    fn row_to_member(row: &MySqlRow) -> Result<Member, DomainError> {
        Ok(Member {
            id: column(row, "id")?,
            email: column(row, "email")?,
            nickname: column(row, "nickname")?,
            password: column(row, "password")?,
            picture_url: column(row, "picture_url")?,
            provider: column(row, "provider")?,
            provider_id: column(row, "provider_id")?,
            social: column(row, "social")?,
            is_active: column(row, "is_active")?,
            roles: BTreeSet::new(),
            audit: audit_from_row(row)?,
        })
    }

    fn select() -> QueryBuilder<'static, MySql> {
        QueryBuilder::new(format!("SELECT {}, {} FROM members", MEMBER_COLUMNS, AUDIT_COLUMNS))
    }

    fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &MemberFilter) {
        builder.push(" WHERE deleted = FALSE");
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", keyword.to_lowercase());
            builder
                .push(" AND (LOWER(nickname) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(email) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(social) = filter.social {
            builder.push(" AND social = ").push_bind(social);
        }
    }

    async fn load_roles(&self, ids: &[i64]) -> Result<HashMap<i64, BTreeSet<MemberRole>>, DomainError> {
        let mut roles: HashMap<i64, BTreeSet<MemberRole>> = HashMap::new();
        if ids.is_empty() {
            return Ok(roles);
        }

        let mut builder = QueryBuilder::<MySql>::new("SELECT member_id, role FROM member_roles WHERE member_id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        for row in &rows {
            let member_id: i64 = column(row, "member_id")?;
            let role: String = column(row, "role")?;
            match role.parse::<MemberRole>() {
                Ok(role) => {
                    roles.entry(member_id).or_default().insert(role);
                }
                Err(e) => tracing::warn!(member_id, "Skipping unknown member role: {}", e),
            }
        }
        Ok(roles)
    }

    async fn with_roles(&self, rows: Vec<MySqlRow>) -> Result<Vec<Member>, DomainError> {
        let mut members = rows.iter().map(Self::row_to_member).collect::<Result<Vec<_>, _>>()?;
        let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
        let mut roles = self.load_roles(&ids).await?;
        for member in &mut members {
            member.roles = roles.remove(&member.id).unwrap_or_default();
        }
        Ok(members)
    }

    async fn find_one(&self, column_name: &str, value: String) -> Result<Option<Member>, DomainError> {
        let mut builder = Self::select();
        builder
            .push(format!(" WHERE deleted = FALSE AND {} = ", column_name))
            .push_bind(value);
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        Ok(self.with_roles(rows).await?.into_iter().next())
    }

    async fn write_roles(
        tx: &mut sqlx::Transaction<'_, MySql>,
        member_id: i64,
        roles: &BTreeSet<MemberRole>,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM member_roles WHERE member_id = ?")
            .bind(member_id)
            .execute(&mut **tx)
            .await
            .map_err(db_error)?;
        for role in roles {
            sqlx::query("INSERT INTO member_roles (member_id, role) VALUES (?, ?)")
                .bind(member_id)
                .bind(role.as_str())
                .execute(&mut **tx)
                .await
                .map_err(db_error)?;
        }
        Ok(())
    }

    async fn exists(&self, column_name: &str, value: &str) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT COUNT(*) FROM members WHERE deleted = FALSE AND {} = ?",
            column_name
        );
        let count: i64 = sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }
}

#[async_trait]
impl MemberRepository for MySqlMemberRepository {
    async fn save(&self, mut member: Member) -> Result<Member, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let query = format!(
            "INSERT INTO members (email, nickname, password, picture_url, provider, provider_id, social, is_active, {}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, {})",
            AUDIT_COLUMNS, AUDIT_PLACEHOLDERS
        );
        let result = bind_audit(
            sqlx::query(&query)
                .bind(&member.email)
                .bind(&member.nickname)
                .bind(&member.password)
                .bind(&member.picture_url)
                .bind(&member.provider)
                .bind(&member.provider_id)
                .bind(member.social)
                .bind(member.is_active),
            &member.audit,
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::custom(ErrorCode::UserEmailAlreadyExists).with_details(member.email.clone())
            } else {
                db_error(e)
            }
        })?;

        member.id = result.last_insert_id() as i64;
        Self::write_roles(&mut tx, member.id, &member.roles).await?;
        tx.commit().await.map_err(db_error)?;
        Ok(member)
    }

    async fn update(&self, member: &Member) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let query = format!(
            "UPDATE members SET nickname = ?, password = ?, picture_url = ?, provider = ?, provider_id = ?, \
             social = ?, is_active = ?, {} WHERE id = ?",
            AUDIT_ASSIGNMENTS
        );
        let result = bind_touch(
            sqlx::query(&query)
                .bind(&member.nickname)
                .bind(&member.password)
                .bind(&member.picture_url)
                .bind(&member.provider)
                .bind(&member.provider_id)
                .bind(member.social)
                .bind(member.is_active),
            &member.audit,
        )
        .bind(member.id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }
        Self::write_roles(&mut tx, member.id, &member.roles).await?;
        tx.commit().await.map_err(db_error)?;
        Ok(true)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let mut builder = Self::select();
        builder.push(" WHERE deleted = FALSE AND id = ").push_bind(id);
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        Ok(self.with_roles(rows).await?.into_iter().next())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.exists("email", email).await
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, DomainError> {
        self.exists("nickname", nickname).await
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM members WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_page(&self, filter: &MemberFilter, query: &PageQuery) -> Result<Page<Member>, DomainError> {
        let total = self.count(filter).await?;

        let mut builder = Self::select();
        Self::push_filter(&mut builder, filter);
        push_order_by(&mut builder, &query.sort, SORT_COLUMNS, "id DESC");
        push_limit(&mut builder, query);
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        Ok(Page::new(self.with_roles(rows).await?, query, total))
    }

    async fn count(&self, filter: &MemberFilter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM members");
        Self::push_filter(&mut builder, filter);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }

    async fn count_by_role(&self, role: MemberRole) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM member_roles mr JOIN members m ON m.id = mr.member_id \
             WHERE m.deleted = FALSE AND mr.role = ?",
        )
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count as u64)
    }
}
