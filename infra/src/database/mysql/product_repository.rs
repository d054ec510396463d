//! MySQL implementation of the ProductRepository trait.
//!
//! Images live in `product_images`, rewritten as a whole on every update.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use mall_core::domain::entities::{Product, ProductImage, ProductStatus};
use mall_core::errors::DomainError;
use mall_core::repositories::{ProductFilter, ProductRepository};
use mall_shared::{ErrorCode, Page, PageQuery};

use super::{
    audit_from_row, bind_audit, bind_touch, column, db_error, push_limit, push_order_by, AUDIT_ASSIGNMENTS,
    AUDIT_COLUMNS, AUDIT_PLACEHOLDERS,
};

const PRODUCT_COLUMNS: &str =
    "id, product_name, description, price, category, stock_quantity, image_url, is_available, status, member_id";

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("productName", "product_name"),
    ("price", "price"),
    ("category", "category"),
    ("stockQuantity", "stock_quantity"),
    ("status", "status"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// MySQL implementation of ProductRepository
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Product entity, without images
    fn row_to_product(row: &MySqlRow) -> Result<Product, DomainError> {
        let status: String = column(row, "status")?;
        Ok(Product {
            id: column(row, "id")?,
            product_name: column(row, "product_name")?,
            description: column(row, "description")?,
            price: column(row, "price")?,
            category: column(row, "category")?,
            stock_quantity: column(row, "stock_quantity")?,
            image_url: column(row, "image_url")?,
            is_available: column(row, "is_available")?,
            status: status.parse::<ProductStatus>().map_err(|e| {
                DomainError::custom(ErrorCode::DatabaseError).with_details(e)
            })?,
            member_id: column(row, "member_id")?,
            images: Vec::new(),
            audit: audit_from_row(row)?,
        })
    }

    fn select() -> QueryBuilder<'static, MySql> {
        QueryBuilder::new(format!("SELECT {}, {} FROM products", PRODUCT_COLUMNS, AUDIT_COLUMNS))
    }

    fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &ProductFilter) {
        builder.push(" WHERE 1 = 1");
        if !filter.include_deleted {
            builder.push(" AND deleted = FALSE");
        }
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", keyword.to_lowercase());
            builder
                .push(" AND (LOWER(product_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(description) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(category) = &filter.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(min) = filter.min_price {
            builder.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            builder.push(" AND price <= ").push_bind(max);
        }
    }

    /// Load the image lists of the given products, keyed by product id
    async fn load_images(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<ProductImage>>, DomainError> {
        let mut images: HashMap<i64, Vec<ProductImage>> = HashMap::new();
        if ids.is_empty() {
            return Ok(images);
        }

        let mut builder = QueryBuilder::<MySql>::new("SELECT product_id, file_name, ord FROM product_images WHERE product_id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY product_id, ord");
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        for row in &rows {
            let product_id: i64 = column(row, "product_id")?;
            images.entry(product_id).or_default().push(ProductImage {
                file_name: column(row, "file_name")?,
                ord: column(row, "ord")?,
            });
        }
        Ok(images)
    }

    async fn with_images(&self, rows: Vec<MySqlRow>) -> Result<Vec<Product>, DomainError> {
        let mut products = rows.iter().map(Self::row_to_product).collect::<Result<Vec<_>, _>>()?;
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        let mut images = self.load_images(&ids).await?;
        for product in &mut products {
            product.images = images.remove(&product.id).unwrap_or_default();
        }
        Ok(products)
    }

    async fn write_images(
        tx: &mut sqlx::Transaction<'_, MySql>,
        product_id: i64,
        images: &[ProductImage],
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM product_images WHERE product_id = ?")
            .bind(product_id)
            .execute(&mut **tx)
            .await
            .map_err(db_error)?;
        for image in images {
            sqlx::query("INSERT INTO product_images (product_id, file_name, ord) VALUES (?, ?, ?)")
                .bind(product_id)
                .bind(&image.file_name)
                .bind(image.ord)
                .execute(&mut **tx)
                .await
                .map_err(db_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn save(&self, mut product: Product) -> Result<Product, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let query = format!(
            "INSERT INTO products (product_name, description, price, category, stock_quantity, image_url, \
             is_available, status, member_id, {}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, {})",
            AUDIT_COLUMNS, AUDIT_PLACEHOLDERS
        );
        let result = bind_audit(
            sqlx::query(&query)
                .bind(&product.product_name)
                .bind(&product.description)
                .bind(product.price)
                .bind(&product.category)
                .bind(product.stock_quantity)
                .bind(&product.image_url)
                .bind(product.is_available)
                .bind(product.status.as_str())
                .bind(product.member_id),
            &product.audit,
        )
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        product.id = result.last_insert_id() as i64;
        Self::write_images(&mut tx, product.id, &product.images).await?;
        tx.commit().await.map_err(db_error)?;
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let query = format!(
            "UPDATE products SET product_name = ?, description = ?, price = ?, category = ?, stock_quantity = ?, \
             image_url = ?, is_available = ?, status = ?, member_id = ?, {} WHERE id = ?",
            AUDIT_ASSIGNMENTS
        );
        let result = bind_touch(
            sqlx::query(&query)
                .bind(&product.product_name)
                .bind(&product.description)
                .bind(product.price)
                .bind(&product.category)
                .bind(product.stock_quantity)
                .bind(&product.image_url)
                .bind(product.is_available)
                .bind(product.status.as_str())
                .bind(product.member_id),
            &product.audit,
        )
        .bind(product.id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }
        Self::write_images(&mut tx, product.id, &product.images).await?;
        tx.commit().await.map_err(db_error)?;
        Ok(true)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let mut builder = Self::select();
        builder.push(" WHERE id = ").push_bind(id);
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        Ok(self.with_images(rows).await?.into_iter().next())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder = Self::select();
        builder.push(" WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        self.with_images(rows).await
    }

    async fn find_page(&self, filter: &ProductFilter, query: &PageQuery) -> Result<Page<Product>, DomainError> {
        let total = self.count(filter).await?;

        let mut builder = Self::select();
        Self::push_filter(&mut builder, filter);
        push_order_by(&mut builder, &query.sort, SORT_COLUMNS, "id DESC");
        push_limit(&mut builder, query);
        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;

        Ok(Page::new(self.with_images(rows).await?, query, total))
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
        Self::push_filter(&mut builder, filter);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }

    async fn average_price(&self, filter: &ProductFilter) -> Result<Option<f64>, DomainError> {
        let mut builder = QueryBuilder::new("SELECT CAST(AVG(price) AS DOUBLE) FROM products");
        Self::push_filter(&mut builder, filter);
        builder
            .build_query_scalar::<Option<f64>>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
