// src/application/dto/pagination.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

/// Offset pagination input: 1-based page number plus page size. Out-of-range
/// values are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct PageRequest {
    #[serde(default = "PageRequest::default_page")]
    pub page: u32,
    #[serde(default = "PageRequest::default_limit")]
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    fn default_page() -> u32 {
        1
    }

    fn default_limit() -> u32 {
        DEFAULT_LIMIT
    }

    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit.clamp(1, MAX_LIMIT))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: &PageRequest) -> Self {
        let limit = request.limit() as u32;
        let total_pages = if total <= 0 {
            0
        } else {
            ((total + i64::from(limit) - 1) / i64::from(limit)) as u32
        };
        Self {
            items,
            total,
            page: request.page(),
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_one_based() {
        let req = PageRequest { page: 3, limit: 10 };
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn zero_page_clamps_to_first() {
        let req = PageRequest { page: 0, limit: 10 };
        assert_eq!(req.page(), 1);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn limit_is_bounded() {
        let req = PageRequest {
            page: 1,
            limit: 10_000,
        };
        assert_eq!(req.limit(), 100);
        assert_eq!(PageRequest { page: 1, limit: 0 }.limit(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest { page: 1, limit: 10 };
        assert_eq!(Page::<i32>::new(vec![], 0, &req).total_pages, 0);
        assert_eq!(Page::<i32>::new(vec![], 10, &req).total_pages, 1);
        assert_eq!(Page::<i32>::new(vec![], 11, &req).total_pages, 2);
    }
}
