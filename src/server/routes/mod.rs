mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use serde::Deserialize;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use super::{deserializers::deserialize_page, error::ApiError};
use crate::db::{Category, PageRequest};

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_page")]
    page: Option<i64>,
}

impl PageQuery {
    fn page_request(&self) -> ApiResponse<PageRequest> {
        match self.page {
            Some(page) => PageRequest::new(page).ok_or(ApiError::NotFound),
            None => Ok(PageRequest::first()),
        }
    }
}

/// `{"1": "Science", ...}` as the web client expects it.
fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
