use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{
        app::AppState, deserializers::NumberOrString, error::ApiError, extractors::ApiJson,
    },
    telemetry::record_quiz_question,
};

use super::ApiResponse;

/// Category id the web client sends for "All".
const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

#[derive(Debug, Deserialize)]
struct QuizCategory {
    id: NumberOrString,
}

#[derive(Debug, Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

/// Uniformly picks one of `candidates` whose id is not in `previous`.
fn pick_unseen<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let seen: HashSet<i64> = previous.iter().copied().collect();
    let unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|question| !seen.contains(&question.id))
        .collect();
    unseen.choose(rng).cloned()
}

#[tracing::instrument(skip_all)]
async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizResponse>> {
    let category = request
        .quiz_category
        .id
        .as_i64()
        .ok_or(ApiError::BadRequest)?;
    let category = (category != ALL_CATEGORIES).then_some(category);

    let candidates = questions::get_quiz_candidates(&pool, category).await?;
    // ThreadRng is !Send, keep it out of the future's state
    let question = {
        let mut rng = rand::thread_rng();
        pick_unseen(candidates, &request.previous_questions, &mut rng)
    };

    match question {
        Some(question) => {
            record_quiz_question(category);
            Ok(Json(QuizResponse {
                success: true,
                question: Some(question),
            }))
        }
        None => {
            tracing::info!(
                ?category,
                seen = request.previous_questions.len(),
                "Quiz pool exhausted"
            );
            Ok(Json(QuizResponse {
                success: false,
                question: None,
            }))
        }
    }
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}"),
            answer: "answer".to_owned(),
            category: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn never_repeats_previous_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = pick_unseen(
                (1..=5).map(question).collect(),
                &[1, 2, 4],
                &mut rng,
            )
            .unwrap();
            assert!(picked.id == 3 || picked.id == 5);
        }
    }

    #[test]
    fn exhausted_pool_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_unseen((1..=3).map(question).collect(), &[3, 1, 2], &mut rng);
        assert_eq!(picked, None);
        assert_eq!(pick_unseen(vec![], &[], &mut rng), None);
    }

    #[test]
    fn every_unseen_question_can_be_drawn() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut drawn = HashSet::new();
        for _ in 0..200 {
            let picked = pick_unseen((1..=4).map(question).collect(), &[2], &mut rng).unwrap();
            drawn.insert(picked.id);
        }
        assert_eq!(drawn, HashSet::from([1, 3, 4]));
    }

    #[test]
    fn exhausted_response_has_no_question_field() {
        let body = serde_json::to_value(QuizResponse {
            success: false,
            question: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "success": false }));
    }
}
