// Path: crates/types/src/app/course.rs

use super::{EntityId, OrganizationRef};
use serde::{Deserialize, Serialize};

/// A lesson document inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// One selectable answer of a quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// The graded quiz that closes a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FinalQuiz {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Listed price in dollars. Converted to wei by the payment flow.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub organization: OrganizationRef,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub final_quiz: Option<FinalQuiz>,
}

impl Course {
    pub fn document(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }
}

/// A priced grouping of courses certified together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub organization: OrganizationRef,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// `GET /course/countCourse`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCount {
    pub total_courses: u64,
}

/// `GET /coursebundles/countCourseBundle`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BundleCount {
    pub count: u64,
}
