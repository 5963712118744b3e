// Path: crates/types/src/app/quiz.rs

use super::EntityId;
use serde::{Deserialize, Serialize};

/// Minimum score that earns a course certificate.
pub const PASSING_SCORE: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: EntityId,
    pub answer_text: String,
}

/// Body of `POST /quiz/submit`. Grading happens server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub user_id: EntityId,
    pub course_id: EntityId,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(rename = "_id", default)]
    pub id: Option<EntityId>,
    pub score: f64,
    #[serde(default)]
    pub user: Option<EntityId>,
    #[serde(default)]
    pub course: Option<EntityId>,
}

impl QuizResult {
    pub fn passed(&self) -> bool {
        self.score >= PASSING_SCORE
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmitResponse {
    pub quiz_result: QuizResult,
}

/// Keeps the `limit` best attempts, highest score first.
pub fn top_attempts(mut results: Vec<QuizResult>, limit: usize) -> Vec<QuizResult> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(score: f64) -> QuizResult {
        QuizResult {
            id: None,
            score,
            user: None,
            course: None,
        }
    }

    #[test]
    fn top_attempts_sorts_descending_and_truncates() {
        let top = top_attempts(vec![attempt(40.0), attempt(90.0), attempt(70.0), attempt(85.0)], 3);
        let scores: Vec<f64> = top.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![90.0, 85.0, 70.0]);
    }

    #[test]
    fn passing_threshold_is_inclusive() {
        assert!(attempt(70.0).passed());
        assert!(!attempt(69.9).passed());
    }
}
