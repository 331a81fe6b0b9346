use serde::{Deserialize, Serialize};

/// Standard pagination response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if total == 0 || per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let meta = PaginationMeta::new(1, 100, 201);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn empty_result_has_no_pages() {
        let meta = PaginationMeta::new(1, 100, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next());
    }
}
