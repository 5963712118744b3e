// Path: crates/types/src/app/enrollment.rs

use super::{Bundle, Course, EntityId};
use serde::{Deserialize, Serialize};

/// The progress record linking a user to a course or a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub user: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<EntityId>,
    /// Percentage in `0.0..=100.0`.
    #[serde(default)]
    pub progress: f64,
    /// Ids of the completed lesson documents.
    #[serde(default, rename = "idOfItems")]
    pub completed_items: Vec<EntityId>,
    #[serde(default)]
    pub completed: bool,
}

impl Enrollment {
    pub fn is_for_course(&self, course_id: &str) -> bool {
        self.course.as_deref() == Some(course_id)
    }

    pub fn is_for_bundle(&self, bundle_id: &str) -> bool {
        self.bundle.as_deref() == Some(bundle_id)
    }
}

/// Body of `PUT /enrollment/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentUpdate {
    #[serde(rename = "idOfItems")]
    pub completed_items: Vec<EntityId>,
    pub progress: f64,
}

impl EnrollmentUpdate {
    /// Progress is `completed / total * 100`; a course without documents reports zero.
    pub fn from_completed(completed_items: Vec<EntityId>, total_documents: usize) -> Self {
        let progress = if total_documents == 0 {
            0.0
        } else {
            completed_items.len() as f64 / total_documents as f64 * 100.0
        };
        Self {
            completed_items,
            progress,
        }
    }
}

/// Enrollment as returned by the "my courses" listing, with the target populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDetail {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub course: Option<Course>,
    #[serde(default)]
    pub bundle: Option<Bundle>,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub completed: bool,
}

impl EnrollmentDetail {
    pub fn title(&self) -> &str {
        self.bundle
            .as_ref()
            .map(|b| b.title.as_str())
            .or_else(|| self.course.as_ref().map(|c| c.title.as_str()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_percentage_of_documents() {
        let update = EnrollmentUpdate::from_completed(vec!["a".into(), "b".into()], 8);
        assert_eq!(update.progress, 25.0);
        let empty = EnrollmentUpdate::from_completed(vec!["a".into()], 0);
        assert_eq!(empty.progress, 0.0);
    }

    #[test]
    fn enrollment_reads_backend_field_names() {
        let raw = r#"{"_id":"e1","user":"u1","course":"c1","progress":50,"idOfItems":["d1"],"completed":false}"#;
        let e: Enrollment = serde_json::from_str(raw).unwrap();
        assert!(e.is_for_course("c1"));
        assert_eq!(e.completed_items, vec!["d1".to_string()]);

        let body = serde_json::to_value(EnrollmentUpdate::from_completed(vec!["d1".into()], 2)).unwrap();
        assert_eq!(body["idOfItems"][0], "d1");
        assert_eq!(body["progress"], 50.0);
    }
}
