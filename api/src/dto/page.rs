//! Paging query parameters

use mall_shared::{PageQuery, Sort, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use validator::Validate;

use crate::handlers::ApiError;

/// `page`, `size` and `sort` as sent by clients.
///
/// `sort` is `field[,asc|desc]`, several criteria separated by `;`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 0, max = 4294967295i64, message = "페이지 번호는 0 이상 4294967295 이하여야 합니다"))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100, message = "페이지 크기는 1 이상 100 이하여야 합니다"))]
    pub size: Option<i64>,

    pub sort: Option<String>,
}

impl PageParams {
    /// Validate and convert, keeping only sort fields in `allowed`
    pub fn to_query(&self, allowed: &[&str], fallback: Sort) -> Result<PageQuery, ApiError> {
        self.validate().map_err(|errors| ApiError::invalid_parameters(&errors))?;

        let page = self.page.and_then(|p| u32::try_from(p).ok()).unwrap_or(0);
        let size = self
            .size
            .and_then(|s| u32::try_from(s).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let sort = Sort::parse(self.sort.as_deref(), allowed, fallback);
        Ok(PageQuery::new(page, size).with_sort(sort))
    }
}
