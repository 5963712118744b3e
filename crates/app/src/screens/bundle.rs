// Path: crates/app/src/screens/bundle.rs

use crate::context::AppContext;
use crate::session::SessionStore;
use crate::view::{Effect, Notice, Route, ViewState};
use learnchain_types::error::{FlowError, ValidationError};
use learnchain_types::{Bundle, BundleCertificateRequest, EntityId};

pub const LABEL_HAS_CERTIFICATE: &str = "You have already received the certificate";
pub const LABEL_GET_CERTIFICATE: &str = "Get Certificate";
pub const LABEL_COMPLETE_ALL: &str = "Complete All Courses to Get Certificate";
pub const CERTIFICATE_ISSUED: &str = "Certificate has been successfully issued!";
pub const CERTIFICATE_NOT_ISSUED: &str = "Failed to issue certificate. Please try again.";
pub const CERTIFICATE_FAILED: &str = "Failed to get certificate. Please try again.";

/// Enrollment state of one member course, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    NotEnrolled,
    InProgress,
    Completed,
}

#[derive(Debug)]
pub struct BundleScreen {
    pub id: EntityId,
    pub state: ViewState<Bundle>,
    pub message: Option<String>,
}

impl BundleScreen {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            state: ViewState::Loading,
            message: None,
        }
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = match ctx.backend.bundle(&self.id).await {
            Ok(bundle) => ViewState::Loaded(bundle),
            Err(e) => {
                tracing::warn!(target: "screen::bundle", bundle = %self.id, error = %e, "bundle failed to load");
                ViewState::Failed(e.to_string())
            }
        };
    }

    pub fn course_status(&self, session: &SessionStore, course_id: &str) -> CourseStatus {
        match session.enrollment_for_course(course_id) {
            None => CourseStatus::NotEnrolled,
            Some(e) if e.completed => CourseStatus::Completed,
            Some(_) => CourseStatus::InProgress,
        }
    }

    /// Every member course has a completed enrollment. A bundle without courses never
    /// qualifies.
    pub fn all_courses_completed(&self, session: &SessionStore) -> bool {
        let Some(bundle) = self.state.loaded() else {
            return false;
        };
        session.is_authenticated()
            && !bundle.courses.is_empty()
            && bundle
                .courses
                .iter()
                .all(|c| self.course_status(session, &c.id) == CourseStatus::Completed)
    }

    pub fn can_request_certificate(&self, session: &SessionStore) -> bool {
        !session.has_bundle_certificate(&self.id) && self.all_courses_completed(session)
    }

    pub fn certificate_label(&self, session: &SessionStore) -> &'static str {
        if session.has_bundle_certificate(&self.id) {
            LABEL_HAS_CERTIFICATE
        } else if self.all_courses_completed(session) {
            LABEL_GET_CERTIFICATE
        } else {
            LABEL_COMPLETE_ALL
        }
    }

    /// Creates the bundle enrollment, then asks for the bundle certificate.
    pub async fn request_certificate(&mut self, ctx: &mut AppContext) -> Effect {
        let outcome = self.issue(ctx).await;
        let message = match outcome {
            Ok(true) => CERTIFICATE_ISSUED,
            Ok(false) => CERTIFICATE_NOT_ISSUED,
            Err(e) => {
                tracing::error!(target: "screen::bundle", bundle = %self.id, error = %e, "certificate request failed");
                CERTIFICATE_FAILED
            }
        };
        self.message = Some(message.to_string());
        Effect::notice(Notice::inline(message))
    }

    async fn issue(&self, ctx: &mut AppContext) -> Result<bool, FlowError> {
        if !self.can_request_certificate(&ctx.session) {
            return Err(ValidationError::CertificateNotEligible.into());
        }
        let bundle = self
            .state
            .loaded()
            .ok_or(ValidationError::CertificateNotEligible)?;
        let user_id = ctx.user()?.id.clone();
        let token = ctx.token().await?;

        let enrollment = ctx
            .backend
            .create_bundle_enrollment(&token, &user_id, &bundle.id)
            .await?;
        ctx.session.add_enrollment(enrollment);

        let request = BundleCertificateRequest {
            user: user_id,
            organization: bundle.organization.id().to_string(),
            bundle: bundle.id.clone(),
        };
        let issued = ctx
            .backend
            .create_bundle_certificate(&token, &request)
            .await?;
        match issued.certificate {
            Some(certificate) => {
                tracing::info!(target: "screen::bundle", bundle = %bundle.id, certificate = %certificate.id, "bundle certificate issued");
                ctx.session.add_certificate(certificate);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn open_course(&self, course_id: &str) -> Route {
        Route::CourseDetail {
            id: course_id.to_string(),
        }
    }
}
