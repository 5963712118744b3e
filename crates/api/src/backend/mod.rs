// Path: crates/api/src/backend/mod.rs

use async_trait::async_trait;
use learnchain_types::error::ApiError;
use learnchain_types::{
    Bundle, BundleCertificateRequest, Certificate, Course, CourseCertificateRequest, Enrollment,
    EnrollmentDetail, EnrollmentUpdate, IssuedCertificate, LoginResponse, Organization,
    OrganizationCourseCount, ProfileUpdate, QuizResult, QuizSubmission, SearchResults,
    SignupResponse, User,
};

/// The backend REST API, one method per endpoint the client uses.
///
/// Reads are unauthenticated. Writes take the bearer token read from local storage;
/// implementations attach it as `Authorization: Bearer <token>`.
#[async_trait]
pub trait BackendApi: Send + Sync {
    // --- Auth ---

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    async fn signup(&self, name: &str, email: &str, password: &str)
        -> Result<SignupResponse, ApiError>;

    // --- Catalog ---

    async fn list_courses(&self, limit: usize) -> Result<Vec<Course>, ApiError>;

    async fn list_bundles(&self, limit: usize) -> Result<Vec<Bundle>, ApiError>;

    async fn count_courses(&self) -> Result<u64, ApiError>;

    async fn count_bundles(&self) -> Result<u64, ApiError>;

    async fn course(&self, course_id: &str) -> Result<Course, ApiError>;

    async fn bundle(&self, bundle_id: &str) -> Result<Bundle, ApiError>;

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError>;

    async fn organizations_with_course_count(
        &self,
    ) -> Result<Vec<OrganizationCourseCount>, ApiError>;

    async fn organization(&self, organization_id: &str) -> Result<Organization, ApiError>;

    // --- Enrollment ---

    async fn create_enrollment(
        &self,
        token: &str,
        user_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, ApiError>;

    async fn create_bundle_enrollment(
        &self,
        token: &str,
        user_id: &str,
        bundle_id: &str,
    ) -> Result<Enrollment, ApiError>;

    async fn update_enrollment(
        &self,
        token: &str,
        enrollment_id: &str,
        update: &EnrollmentUpdate,
    ) -> Result<Enrollment, ApiError>;

    async fn user_enrollments(&self, user_id: &str) -> Result<Vec<EnrollmentDetail>, ApiError>;

    // --- Quiz & certificates ---

    async fn submit_quiz(
        &self,
        token: &str,
        submission: &QuizSubmission,
    ) -> Result<QuizResult, ApiError>;

    async fn quiz_results(&self, user_id: &str, course_id: &str)
        -> Result<Vec<QuizResult>, ApiError>;

    async fn create_certificate(
        &self,
        token: &str,
        request: &CourseCertificateRequest,
    ) -> Result<IssuedCertificate, ApiError>;

    async fn create_bundle_certificate(
        &self,
        token: &str,
        request: &BundleCertificateRequest,
    ) -> Result<IssuedCertificate, ApiError>;

    async fn student_certificates(&self, user_id: &str) -> Result<Vec<Certificate>, ApiError>;

    // --- Profile ---

    async fn update_profile(
        &self,
        token: &str,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError>;
}
