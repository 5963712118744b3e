// Path: crates/app/src/screens/course.rs

use crate::context::AppContext;
use crate::payment::join_course;
use crate::session::SessionStore;
use crate::view::{Effect, Notice, Route, ViewState};
use learnchain_types::{Course, EntityId};

pub const LABEL_PROCESSING: &str = "Processing...";
pub const LABEL_GO_TO_COURSE: &str = "Go to Course";
pub const LABEL_JOIN: &str = "Join Course";

#[derive(Debug)]
pub struct CourseScreen {
    pub id: EntityId,
    pub state: ViewState<Course>,
    /// Inline message under the join button.
    pub message: Option<String>,
    processing: bool,
}

impl CourseScreen {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            state: ViewState::Loading,
            message: None,
            processing: false,
        }
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = match ctx.backend.course(&self.id).await {
            Ok(course) => ViewState::Loaded(course),
            Err(e) => {
                tracing::warn!(target: "screen::course", course = %self.id, error = %e, "course failed to load");
                ViewState::Failed(e.to_string())
            }
        };
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn join_label(&self, session: &SessionStore) -> &'static str {
        if self.processing {
            LABEL_PROCESSING
        } else if session.is_enrolled(&self.id) {
            LABEL_GO_TO_COURSE
        } else {
            LABEL_JOIN
        }
    }

    /// The join button. Ignored while a previous join is still running.
    pub async fn join(&mut self, ctx: &mut AppContext) -> Effect {
        if self.processing {
            return Effect::none();
        }
        let Some(course) = self.state.loaded().cloned() else {
            return Effect::none();
        };

        self.processing = true;
        self.message = None;
        let effect = join_course(ctx, &course).await;
        self.processing = false;

        if let Some(Notice::Inline(message)) = &effect.notice {
            self.message = Some(message.clone());
        }
        effect
    }

    pub fn open_organization(&self) -> Option<Route> {
        self.state.loaded().map(|c| Route::OrganizationDetail {
            id: c.organization.id().to_string(),
        })
    }
}
