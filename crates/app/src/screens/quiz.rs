// Path: crates/app/src/screens/quiz.rs

use crate::context::AppContext;
use crate::view::{Effect, Notice, Route, ViewState};
use learnchain_types::error::{FlowError, ValidationError};
use learnchain_types::{
    Course, CourseCertificateRequest, EntityId, FinalQuiz, QuizAnswer, QuizResult, QuizSubmission,
};
use std::collections::HashMap;

pub const SUBMIT_FAILED: &str = "Failed to submit the quiz. Please try again.";

/// The learner's selections: question id to option id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSheet {
    selections: HashMap<EntityId, EntityId>,
}

impl QuizSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting again replaces the previous choice.
    pub fn select(&mut self, question_id: impl Into<EntityId>, option_id: impl Into<EntityId>) {
        self.selections.insert(question_id.into(), option_id.into());
    }

    pub fn selection(&self, question_id: &str) -> Option<&str> {
        self.selections.get(question_id).map(String::as_str)
    }

    pub fn is_complete(&self, quiz: &FinalQuiz) -> bool {
        quiz.questions
            .iter()
            .all(|q| self.selections.contains_key(&q.id))
    }

    /// Resolves the selections to answer texts, in question order.
    ///
    /// Every question must be answered, and with one of its own options.
    pub fn answers(&self, quiz: &FinalQuiz) -> Result<Vec<QuizAnswer>, ValidationError> {
        let unanswered: Vec<String> = quiz
            .questions
            .iter()
            .filter(|q| !self.selections.contains_key(&q.id))
            .map(|q| q.id.clone())
            .collect();
        if !unanswered.is_empty() {
            return Err(ValidationError::UnansweredQuestions(unanswered));
        }

        quiz.questions
            .iter()
            .map(|question| {
                let option_id = self
                    .selections
                    .get(&question.id)
                    .ok_or_else(|| ValidationError::UnansweredQuestions(vec![question.id.clone()]))?;
                let option =
                    question
                        .option(option_id)
                        .ok_or_else(|| ValidationError::UnknownOption {
                            question: question.id.clone(),
                            option: option_id.clone(),
                        })?;
                Ok(QuizAnswer {
                    question_id: question.id.clone(),
                    answer_text: option.text.clone(),
                })
            })
            .collect()
    }
}

/// The final quiz of a course.
#[derive(Debug)]
pub struct FinalTestScreen {
    pub course_id: EntityId,
    pub state: ViewState<Course>,
    pub sheet: QuizSheet,
    pub last_result: Option<QuizResult>,
    submitting: bool,
}

impl FinalTestScreen {
    pub fn new(course_id: impl Into<EntityId>) -> Self {
        Self {
            course_id: course_id.into(),
            state: ViewState::Loading,
            sheet: QuizSheet::new(),
            last_result: None,
            submitting: false,
        }
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.state = ViewState::Loaded(course);
        self
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = match ctx.backend.course(&self.course_id).await {
            Ok(course) => ViewState::Loaded(course),
            Err(e) => ViewState::Failed(e.to_string()),
        };
    }

    pub fn quiz(&self) -> Option<&FinalQuiz> {
        self.state.loaded().and_then(|c| c.final_quiz.as_ref())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn select(&mut self, question_id: &str, option_id: &str) {
        self.sheet.select(question_id, option_id);
    }

    /// Validates, submits for grading and acts on the score: a pass requests the
    /// certificate and completes the enrollment, a fail returns to the course.
    pub async fn submit(&mut self, ctx: &mut AppContext) -> Effect {
        if self.submitting {
            return Effect::none();
        }
        let Some(course) = self.state.loaded().cloned() else {
            return Effect::none();
        };
        let answers = match course
            .final_quiz
            .as_ref()
            .ok_or(ValidationError::MissingQuiz)
            .and_then(|quiz| self.sheet.answers(quiz))
        {
            Ok(answers) => answers,
            Err(e) => return Effect::notice(Notice::alert("Quiz incomplete", e.to_string())),
        };

        self.submitting = true;
        let outcome = self.grade(ctx, &course, answers).await;
        self.submitting = false;

        match outcome {
            Ok(effect) => effect,
            Err(e) => {
                tracing::error!(target: "screen::quiz", course = %course.id, error = %e, "quiz submission failed");
                Effect::notice(Notice::alert("Error", SUBMIT_FAILED))
            }
        }
    }

    async fn grade(
        &mut self,
        ctx: &mut AppContext,
        course: &Course,
        answers: Vec<QuizAnswer>,
    ) -> Result<Effect, FlowError> {
        let user_id = ctx.user()?.id.clone();
        let token = ctx.token().await?;
        let submission = QuizSubmission {
            user_id: user_id.clone(),
            course_id: course.id.clone(),
            answers,
        };
        let result = ctx.backend.submit_quiz(&token, &submission).await?;
        tracing::info!(target: "screen::quiz", course = %course.id, score = result.score, "quiz graded");
        self.last_result = Some(result.clone());

        if !result.passed() {
            return Ok(Effect::navigate(Route::LearnCourse {
                id: course.id.clone(),
                reload: true,
            }));
        }

        let request = CourseCertificateRequest {
            user: user_id,
            organization: course.organization.id().to_string(),
            course: course.id.clone(),
            score: result.score,
        };
        let issued = ctx.backend.create_certificate(&token, &request).await?;

        if let Some(enrollment_id) = ctx
            .session
            .enrollment_for_course(&course.id)
            .map(|e| e.id.clone())
        {
            ctx.session.complete_enrollment(&enrollment_id);
        }
        if let Some(certificate) = issued.certificate {
            ctx.session.add_certificate(certificate);
        }
        Ok(Effect::navigate(Route::Home))
    }
}
