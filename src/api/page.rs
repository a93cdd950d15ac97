use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub current_page: i64,
    pub total_page: i64,
    pub size: i64,
}

impl Paging {
    /// `total_page` is `ceil(total / size)`; `size` must be positive
    pub fn new(current_page: i64, size: i64, total: i64) -> Self {
        let total_page = if size > 0 { (total.max(0) + size - 1) / size } else { 0 };
        Self {
            current_page,
            total_page,
            size,
        }
    }

    /// Rows to skip before the current page
    pub fn offset(page: i64, size: i64) -> i64 {
        (page.max(1) - 1).saturating_mul(size)
    }
}

/// Page envelope returned by search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pageable<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_page_is_ceiling_of_total_over_size() {
        assert_eq!(Paging::new(1, 10, 0).total_page, 0);
        assert_eq!(Paging::new(1, 10, 1).total_page, 1);
        assert_eq!(Paging::new(1, 10, 10).total_page, 1);
        assert_eq!(Paging::new(1, 10, 11).total_page, 2);
        assert_eq!(Paging::new(3, 7, 100).total_page, 15);
    }

    #[test]
    fn offset_for_page() {
        assert_eq!(Paging::offset(1, 10), 0);
        assert_eq!(Paging::offset(2, 10), 10);
        assert_eq!(Paging::offset(5, 3), 12);
    }

    #[test]
    fn page_beyond_end_keeps_metadata() {
        let page: Pageable<i64> = Pageable {
            data: vec![],
            paging: Paging::new(9, 10, 15),
        };
        let body = serde_json::to_value(&page).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": [],
                "paging": { "current_page": 9, "total_page": 2, "size": 10 }
            })
        );
    }
}
