//! Pagination types for list endpoints.
//!
//! Page numbers are 1-based on the wire.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use domain::MAX_PAGE_SIZE;

/// Pagination query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Page size
    pub size: Option<u64>,
}

impl PageParams {
    /// Resolve against an endpoint-specific default page size.
    pub fn resolve(&self, default_size: u64) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.size.unwrap_or(default_size))
    }
}

/// Largest row offset a query may use (Postgres `OFFSET` is a BIGINT).
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A normalized page request: `page >= 1`, `1 <= size <= MAX_PAGE_SIZE`,
/// and the page's offset never exceeds `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        let size = size.clamp(1, MAX_PAGE_SIZE);
        Self {
            page: page.clamp(1, MAX_OFFSET / size + 1),
            size,
        }
    }

    /// Zero-based page index, as used by SeaORM paginators.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.index().checked_mul(self.size).unwrap_or(MAX_OFFSET)
    }
}

/// Page of results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub number_of_elements: u64,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size);
        let number_of_elements = content.len() as u64;

        Self {
            empty: content.is_empty(),
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: request.page == 1,
            last: request.page >= total_pages,
            number_of_elements,
        }
    }

    /// Convert the items, keeping page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            empty: self.empty,
            number_of_elements: self.number_of_elements,
        }
    }
}
