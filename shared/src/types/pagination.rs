//! Pagination types for list endpoints
//!
//! [`PageQuery`] describes what a caller asked for, [`Page`] is what a
//! repository returns, and [`PageResponse`] is the payload placed inside the
//! response envelope.

use serde::{Deserialize, Serialize};

use super::sort::Sort;

/// Default page size
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size accepted from clients
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated, zero-based page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::unsorted(),
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u64 {
        self.size as u64
    }

    /// Cut one page out of an already filtered and ordered list
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len() as u64;
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let content = items
            .into_iter()
            .skip(offset)
            .take(self.size as usize)
            .collect();
        Page::new(content, self, total)
    }
}

/// One page of records as returned by a repository
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub sort: Sort,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, query: &PageQuery, total_elements: u64) -> Self {
        Self {
            content,
            page: query.page,
            size: query.size,
            total_elements,
            sort: query.sort.clone(),
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            sort: self.sort,
        }
    }
}

/// Request echo inside [`PageResponse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
    pub sort: String,
}

/// Paginated payload with derived navigation flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> PageResponse<T> {
    /// Build a page payload, deriving every flag from the inputs.
    ///
    /// A `size` of zero reports zero pages; request validation keeps such
    /// values from reaching this point.
    pub fn of(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        Self::of_sorted(content, page, size, total_elements, Sort::unsorted().to_string())
    }

    pub fn of_sorted(
        content: Vec<T>,
        page: u32,
        size: u32,
        total_elements: u64,
        sort: impl Into<String>,
    ) -> Self {
        let total_pages = Self::calculate_total_pages(total_elements, size);
        let empty = content.is_empty();

        Self {
            content,
            pageable: Pageable {
                page,
                size,
                sort: sort.into(),
            },
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: total_pages == 0 || page as u64 >= total_pages - 1,
            empty,
        }
    }

    /// Convert a repository page, mapping each record into its outbound form
    pub fn from_page<E, F>(page: Page<E>, mapper: F) -> Self
    where
        F: FnMut(E) -> T,
    {
        let sort = page.sort.to_string();
        let content = page.content.into_iter().map(mapper).collect();
        Self::of_sorted(content, page.page, page.size, page.total_elements, sort)
    }

    /// Calculate total pages
    fn calculate_total_pages(total: u64, size: u32) -> u64 {
        if size == 0 {
            0
        } else {
            total.div_ceil(size as u64)
        }
    }

    /// Map the content to another type
    pub fn map<U, F>(self, f: F) -> PageResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            pageable: self.pageable,
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
