// Path: crates/app/src/screens/learn.rs

use crate::context::AppContext;
use crate::session::SessionStore;
use crate::view::{Effect, Notice, Route, ViewState};
use learnchain_types::error::{FlowError, ValidationError};
use learnchain_types::{top_attempts, Course, EntityId, Enrollment, EnrollmentUpdate, QuizResult};

pub const LABEL_QUIZ_COMPLETED: &str = "Quiz Completed";
pub const LABEL_START_QUIZ: &str = "Start Quiz";
pub const NOT_ENROLLED: &str = "You are not enrolled in this course.";
pub const LESSON_COMPLETED: &str = "Lesson marked as completed";
pub const LESSON_FAILED: &str = "Error marking lesson as completed";
/// Number of past quiz attempts shown.
pub const TOP_ATTEMPTS: usize = 3;

/// Adds `document_id` to the course enrollment's completed items and sends the new
/// progress (`completed / documents * 100`) to the backend. Completing an already
/// completed document changes nothing and sends nothing.
pub(crate) async fn mark_lesson_complete(
    ctx: &mut AppContext,
    course: &Course,
    document_id: &str,
) -> Result<Enrollment, FlowError> {
    let enrollment = ctx
        .session
        .enrollment_for_course(&course.id)
        .cloned()
        .ok_or_else(|| ValidationError::NotEnrolled(course.id.clone()))?;
    if enrollment.completed_items.iter().any(|id| id == document_id) {
        return Ok(enrollment);
    }

    let mut completed = enrollment.completed_items.clone();
    completed.push(document_id.to_string());
    let update = EnrollmentUpdate::from_completed(completed, course.documents.len());

    let token = ctx.token().await?;
    let updated = ctx
        .backend
        .update_enrollment(&token, &enrollment.id, &update)
        .await?;
    tracing::info!(
        target: "screen::learn",
        enrollment = %updated.id,
        progress = updated.progress,
        "lesson completed"
    );
    ctx.session.update_enrollment(updated.clone());
    Ok(updated)
}

#[derive(Debug)]
pub struct LearnScreen {
    pub id: EntityId,
    pub state: ViewState<Course>,
    /// Best attempts first.
    pub quiz_results: Vec<QuizResult>,
    reload: bool,
}

impl LearnScreen {
    pub fn new(id: impl Into<EntityId>, reload: bool) -> Self {
        Self {
            id: id.into(),
            state: ViewState::Loading,
            quiz_results: Vec::new(),
            reload,
        }
    }

    /// Opened with `reload`, e.g. after a failed quiz, so results must be refetched.
    pub fn needs_reload(&self) -> bool {
        self.reload
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = match ctx.backend.course(&self.id).await {
            Ok(course) => ViewState::Loaded(course),
            Err(e) => {
                tracing::warn!(target: "screen::learn", course = %self.id, error = %e, "course failed to load");
                ViewState::Failed(e.to_string())
            }
        };

        if let Some(user) = ctx.session.user() {
            match ctx.backend.quiz_results(&user.id, &self.id).await {
                Ok(results) => self.quiz_results = top_attempts(results, TOP_ATTEMPTS),
                Err(e) => {
                    tracing::warn!(target: "screen::learn", course = %self.id, error = %e, "quiz results failed to load")
                }
            }
        }
        self.reload = false;
    }

    pub fn is_lesson_complete(&self, session: &SessionStore, document_id: &str) -> bool {
        session
            .enrollment_for_course(&self.id)
            .is_some_and(|e| e.completed_items.iter().any(|id| id == document_id))
    }

    fn all_lessons_complete(&self, session: &SessionStore) -> bool {
        let (Some(course), Some(enrollment)) =
            (self.state.loaded(), session.enrollment_for_course(&self.id))
        else {
            return false;
        };
        course
            .documents
            .iter()
            .all(|d| enrollment.completed_items.contains(&d.id))
    }

    /// The quiz opens once every lesson is done, and only until it has been passed.
    pub fn can_start_quiz(&self, session: &SessionStore) -> bool {
        let finished = session
            .enrollment_for_course(&self.id)
            .is_some_and(|e| e.completed);
        !finished && self.all_lessons_complete(session)
    }

    pub fn quiz_label(&self, session: &SessionStore) -> &'static str {
        if session
            .enrollment_for_course(&self.id)
            .is_some_and(|e| e.completed)
        {
            LABEL_QUIZ_COMPLETED
        } else {
            LABEL_START_QUIZ
        }
    }

    pub async fn complete_lesson(&mut self, ctx: &mut AppContext, document_id: &str) -> Effect {
        let Some(course) = self.state.loaded().cloned() else {
            return Effect::none();
        };
        match mark_lesson_complete(ctx, &course, document_id).await {
            Ok(_) => Effect::notice(Notice::alert("Success", LESSON_COMPLETED)),
            Err(FlowError::Validation(ValidationError::NotEnrolled(_))) => {
                Effect::notice(Notice::alert("Error", NOT_ENROLLED))
            }
            Err(e) => {
                tracing::error!(target: "screen::learn", course = %self.id, error = %e, "lesson completion failed");
                Effect::notice(Notice::alert("Error", LESSON_FAILED))
            }
        }
    }

    pub fn open_document(&self, document_id: &str) -> Route {
        Route::DocumentDetail {
            course_id: self.id.clone(),
            document_id: document_id.to_string(),
        }
    }

    pub fn start_quiz(&self, session: &SessionStore) -> Effect {
        if self.can_start_quiz(session) {
            Effect::navigate(Route::FinalTest {
                course_id: self.id.clone(),
            })
        } else {
            Effect::none()
        }
    }
}
