pub const QUESTIONS_PER_PAGE: i64 = 10;

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest(i64);

impl PageRequest {
    pub fn new(page: i64) -> Option<Self> {
        (page >= 1).then_some(PageRequest(page))
    }

    pub fn first() -> Self {
        PageRequest(1)
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    pub fn limit(&self) -> i64 {
        QUESTIONS_PER_PAGE
    }

    pub fn offset(&self) -> i64 {
        (self.0 - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole filtered result set, not just this page.
    pub total: i64,
    pub page: i64,
}

impl<T> Page<T> {
    /// An empty page past the first one.
    pub fn is_out_of_range(&self) -> bool {
        self.items.is_empty() && self.page > 1
    }
}
