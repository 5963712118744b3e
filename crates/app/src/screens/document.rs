// Path: crates/app/src/screens/document.rs

use super::learn::{mark_lesson_complete, LESSON_FAILED, NOT_ENROLLED};
use crate::context::AppContext;
use crate::view::{Effect, Notice, Route, ViewState};
use learnchain_types::error::{FlowError, ValidationError};
use learnchain_types::{Course, Document, EntityId};

/// A single lesson, opened from the learning screen.
#[derive(Debug)]
pub struct DocumentScreen {
    pub course_id: EntityId,
    pub document_id: EntityId,
    pub state: ViewState<Course>,
}

impl DocumentScreen {
    pub fn new(course_id: impl Into<EntityId>, document_id: impl Into<EntityId>) -> Self {
        Self {
            course_id: course_id.into(),
            document_id: document_id.into(),
            state: ViewState::Loading,
        }
    }

    /// Takes the course already fetched by the learning screen.
    pub fn with_course(mut self, course: Course) -> Self {
        self.state = ViewState::Loaded(course);
        self
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = match ctx.backend.course(&self.course_id).await {
            Ok(course) if course.document(&self.document_id).is_some() => ViewState::Loaded(course),
            Ok(_) => ViewState::Failed(format!("Document {} not found", self.document_id)),
            Err(e) => ViewState::Failed(e.to_string()),
        };
    }

    pub fn document(&self) -> Option<&Document> {
        self.state
            .loaded()
            .and_then(|c| c.document(&self.document_id))
    }

    /// Marks the lesson complete and goes back to the course.
    pub async fn complete(&mut self, ctx: &mut AppContext) -> Effect {
        let Some(course) = self.state.loaded().cloned() else {
            return Effect::none();
        };
        match mark_lesson_complete(ctx, &course, &self.document_id).await {
            Ok(_) => Effect::navigate(Route::LearnCourse {
                id: self.course_id.clone(),
                reload: false,
            }),
            Err(FlowError::Validation(ValidationError::NotEnrolled(_))) => {
                Effect::notice(Notice::alert("Error", NOT_ENROLLED))
            }
            Err(e) => {
                tracing::error!(target: "screen::document", document = %self.document_id, error = %e, "lesson completion failed");
                Effect::notice(Notice::alert("Error", LESSON_FAILED))
            }
        }
    }
}
