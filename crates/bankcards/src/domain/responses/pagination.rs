use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
    pub total_items: i64,
    pub total_pages: i32,
}

impl Pagination {
    pub fn new(page: i32, page_size: i32, total_items: i64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as i32;
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            total_items: 0,
            total_pages: 0,
        }
    }
}
