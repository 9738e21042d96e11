use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        deserializers::NumberOrString,
        error::ApiError,
        extractors::{ApiJson, ApiPath, ApiQuery},
    },
};

use super::{category_map, ApiResponse, PageQuery};

// Absent or null fields are rejected together with empty strings.
#[derive(Debug, Deserialize)]
struct NewQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    category: Option<NumberOrString>,
    difficulty: Option<NumberOrString>,
}

impl NewQuestionBody {
    fn validate(self) -> ApiResponse<NewQuestion> {
        let (Some(question), Some(answer), Some(category), Some(difficulty)) =
            (self.question, self.answer, self.category, self.difficulty)
        else {
            return Err(ApiError::BadRequest);
        };
        if question.is_empty() || answer.is_empty() || category.is_empty() || difficulty.is_empty()
        {
            return Err(ApiError::BadRequest);
        }
        let (Some(category), Some(difficulty)) = (category.as_i64(), difficulty.as_i64()) else {
            return Err(ApiError::BadRequest);
        };
        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    total_questions: i64,
}

#[tracing::instrument(skip_all)]
async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let page = query.page_request()?;
    let questions = questions::get_questions_page(&pool, page).await?;
    if questions.items.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions: questions.items,
        total_questions: questions.total,
        categories: category_map(categories),
    }))
}

#[tracing::instrument(skip_all)]
async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<NewQuestionBody>,
) -> ApiResponse<Json<Created>> {
    let new_question = body.validate()?;
    match categories::get_category(&pool, new_question.category).await {
        Ok(_) => {}
        Err(sqlx::Error::RowNotFound) => {
            tracing::info!(category = new_question.category, "Unknown category");
            return Err(ApiError::Unprocessable);
        }
        Err(error) => return Err(error.into()),
    }
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|error| {
            tracing::warn!("Failed to insert question: {}", error);
            ApiError::Unprocessable
        })?;
    tracing::info!(id, "Question created");

    Ok(Json(Created {
        success: true,
        created: id,
        total_questions: questions::count_questions(&pool).await?,
    }))
}

#[tracing::instrument(skip_all)]
async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    questions::delete_question(&pool, id)
        .await
        .map_err(|error| {
            tracing::info!(id, "Failed to delete question: {}", error);
            ApiError::Unprocessable
        })?;
    tracing::info!(id, "Question deleted");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
        total_questions: questions::count_questions(&pool).await?,
    }))
}

#[tracing::instrument(skip_all)]
async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body
        .search_term
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .ok_or(ApiError::NotFound)?;
    let page = query.page_request()?;
    let results = questions::search_questions(&pool, term, page).await?;
    if results.is_out_of_range() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResults {
        success: true,
        questions: results.items,
        total_questions: results.total,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
