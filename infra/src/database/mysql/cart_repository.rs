//! MySQL implementations of the CartRepository and CartItemRepository traits.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use mall_core::domain::entities::{Cart, CartItem};
use mall_core::errors::DomainError;
use mall_core::repositories::{CartItemRepository, CartRepository};

use super::{
    audit_from_row, bind_audit, bind_touch, column, db_error, AUDIT_ASSIGNMENTS, AUDIT_COLUMNS, AUDIT_PLACEHOLDERS,
};

/// MySQL implementation of CartRepository
pub struct MySqlCartRepository {
    pool: MySqlPool,
}

impl MySqlCartRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_cart(row: &MySqlRow) -> Result<Cart, DomainError> {
        Ok(Cart {
            cno: column(row, "cno")?,
            owner_email: column(row, "owner_email")?,
            audit: audit_from_row(row)?,
        })
    }

    async fn find_where(&self, condition: &str, value: CartKey<'_>) -> Result<Option<Cart>, DomainError> {
        let query = format!("SELECT cno, owner_email, {} FROM carts WHERE {} = ?", AUDIT_COLUMNS, condition);
        let query = sqlx::query(&query);
        let query = match value {
            CartKey::Id(cno) => query.bind(cno),
            CartKey::Owner(email) => query.bind(email),
        };
        let row = query.fetch_optional(&self.pool).await.map_err(db_error)?;
        row.as_ref().map(Self::row_to_cart).transpose()
    }
}

enum CartKey<'a> {
    Id(i64),
    Owner(&'a str),
}

#[async_trait]
impl CartRepository for MySqlCartRepository {
    async fn save(&self, mut cart: Cart) -> Result<Cart, DomainError> {
        let query = format!(
            "INSERT INTO carts (owner_email, {}) VALUES (?, {})",
            AUDIT_COLUMNS, AUDIT_PLACEHOLDERS
        );
        let result = bind_audit(sqlx::query(&query).bind(&cart.owner_email), &cart.audit)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        cart.cno = result.last_insert_id() as i64;
        Ok(cart)
    }

    async fn update(&self, cart: &Cart) -> Result<bool, DomainError> {
        let query = format!("UPDATE carts SET {} WHERE cno = ?", AUDIT_ASSIGNMENTS);
        let result = bind_touch(sqlx::query(&query), &cart.audit)
            .bind(cart.cno)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, cno: i64) -> Result<Option<Cart>, DomainError> {
        self.find_where("cno", CartKey::Id(cno)).await
    }

    async fn find_by_owner(&self, email: &str) -> Result<Option<Cart>, DomainError> {
        self.find_where("owner_email", CartKey::Owner(email)).await
    }
}

/// MySQL implementation of CartItemRepository
pub struct MySqlCartItemRepository {
    pool: MySqlPool,
}

impl MySqlCartItemRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &MySqlRow) -> Result<CartItem, DomainError> {
        Ok(CartItem {
            cino: column(row, "cino")?,
            cno: column(row, "cno")?,
            product_id: column(row, "product_id")?,
            qty: column(row, "qty")?,
            audit: audit_from_row(row)?,
        })
    }

    fn select() -> QueryBuilder<'static, MySql> {
        QueryBuilder::new(format!("SELECT cino, cno, product_id, qty, {} FROM cart_items", AUDIT_COLUMNS))
    }
}

#[async_trait]
impl CartItemRepository for MySqlCartItemRepository {
    async fn save(&self, mut item: CartItem) -> Result<CartItem, DomainError> {
        let query = format!(
            "INSERT INTO cart_items (cno, product_id, qty, {}) VALUES (?, ?, ?, {})",
            AUDIT_COLUMNS, AUDIT_PLACEHOLDERS
        );
        let result = bind_audit(
            sqlx::query(&query).bind(item.cno).bind(item.product_id).bind(item.qty),
            &item.audit,
        )
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        item.cino = result.last_insert_id() as i64;
        Ok(item)
    }

    async fn update(&self, item: &CartItem) -> Result<bool, DomainError> {
        let query = format!("UPDATE cart_items SET qty = ?, {} WHERE cino = ?", AUDIT_ASSIGNMENTS);
        let result = bind_touch(sqlx::query(&query).bind(item.qty), &item.audit)
            .bind(item.cino)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, cino: i64) -> Result<Option<CartItem>, DomainError> {
        let mut builder = Self::select();
        builder.push(" WHERE cino = ").push_bind(cino);
        let row = builder.build().fetch_optional(&self.pool).await.map_err(db_error)?;
        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn find_by_cart(&self, cno: i64) -> Result<Vec<CartItem>, DomainError> {
        let mut builder = Self::select();
        builder.push(" WHERE cno = ").push_bind(cno).push(" ORDER BY cino ASC");
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;
        rows.iter().map(Self::row_to_item).collect()
    }

    async fn find_by_cart_and_product(&self, cno: i64, product_id: i64) -> Result<Option<CartItem>, DomainError> {
        let mut builder = Self::select();
        builder
            .push(" WHERE cno = ")
            .push_bind(cno)
            .push(" AND product_id = ")
            .push_bind(product_id);
        let row = builder.build().fetch_optional(&self.pool).await.map_err(db_error)?;
        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn delete_by_id(&self, cino: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cino = ?")
            .bind(cino)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_ids(&self, cno: i64, cinos: &[i64]) -> Result<u64, DomainError> {
        if cinos.is_empty() {
            return Ok(0);
        }
        let mut builder = QueryBuilder::<MySql>::new("DELETE FROM cart_items WHERE cno = ");
        builder.push_bind(cno).push(" AND cino IN (");
        let mut separated = builder.separated(", ");
        for cino in cinos {
            separated.push_bind(*cino);
        }
        separated.push_unseparated(")");
        let result = builder.build().execute(&self.pool).await.map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_by_cart(&self, cno: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cno = ?")
            .bind(cno)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }
}
