// Path: crates/api/src/mock/backend.rs

use super::lock;
use crate::backend::BackendApi;
use async_trait::async_trait;
use learnchain_types::error::ApiError;
use learnchain_types::{
    Bundle, BundleCertificateRequest, Certificate, Course, CourseCertificateRequest, Enrollment,
    EnrollmentDetail, EnrollmentUpdate, IssuedCertificate, LoginResponse, Organization,
    OrganizationCourseCount, ProfileUpdate, QuizResult, QuizSubmission, SearchResults,
    SignupResponse, User,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendCall {
    /// Trait method name, e.g. `"create_enrollment"`.
    pub endpoint: &'static str,
    /// Bearer token, for authenticated writes.
    pub token: Option<String>,
    /// Main argument (an id or the search query).
    pub detail: String,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, (String, User)>,
    courses: HashMap<String, Course>,
    bundles: HashMap<String, Bundle>,
    organizations: HashMap<String, Organization>,
    organization_counts: Vec<OrganizationCourseCount>,
    search_results: HashMap<String, SearchResults>,
    search_delays: HashMap<String, Duration>,
    enrollments: HashMap<String, Enrollment>,
    enrollment_details: Vec<EnrollmentDetail>,
    quiz_score: f64,
    quiz_results: Vec<QuizResult>,
    certificates: Vec<Certificate>,
    submissions: Vec<QuizSubmission>,
    failing: HashSet<&'static str>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// A scripted backend. Seed it with entities, force endpoints to fail, and inspect the
/// recorded calls afterwards.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<State>,
    calls: Mutex<Vec<BackendCall>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, password: &str, user: User) -> Self {
        lock(&self.state)
            .accounts
            .insert(user.email.clone(), (password.to_string(), user));
        self
    }

    pub fn with_course(self, course: Course) -> Self {
        lock(&self.state).courses.insert(course.id.clone(), course);
        self
    }

    pub fn with_bundle(self, bundle: Bundle) -> Self {
        lock(&self.state).bundles.insert(bundle.id.clone(), bundle);
        self
    }

    pub fn with_organization(self, organization: Organization) -> Self {
        lock(&self.state)
            .organizations
            .insert(organization.id.clone(), organization);
        self
    }

    pub fn with_organization_counts(self, counts: Vec<OrganizationCourseCount>) -> Self {
        lock(&self.state).organization_counts = counts;
        self
    }

    pub fn with_enrollment(self, enrollment: Enrollment) -> Self {
        lock(&self.state)
            .enrollments
            .insert(enrollment.id.clone(), enrollment);
        self
    }

    pub fn with_enrollment_details(self, details: Vec<EnrollmentDetail>) -> Self {
        lock(&self.state).enrollment_details = details;
        self
    }

    pub fn with_search_results(self, query: &str, results: SearchResults) -> Self {
        lock(&self.state)
            .search_results
            .insert(query.to_string(), results);
        self
    }

    /// Delays the answer to one search query, to simulate a slow request.
    pub fn with_search_delay(self, query: &str, delay: Duration) -> Self {
        lock(&self.state)
            .search_delays
            .insert(query.to_string(), delay);
        self
    }

    pub fn with_quiz_score(self, score: f64) -> Self {
        lock(&self.state).quiz_score = score;
        self
    }

    pub fn with_quiz_results(self, results: Vec<QuizResult>) -> Self {
        lock(&self.state).quiz_results = results;
        self
    }

    pub fn with_certificates(self, certificates: Vec<Certificate>) -> Self {
        lock(&self.state).certificates = certificates;
        self
    }

    /// Makes every subsequent call to `endpoint` fail with a network error.
    pub fn fail(&self, endpoint: &'static str) {
        lock(&self.state).failing.insert(endpoint);
    }

    pub fn heal(&self, endpoint: &'static str) {
        lock(&self.state).failing.remove(endpoint);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<BackendCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub fn submissions(&self) -> Vec<QuizSubmission> {
        lock(&self.state).submissions.clone()
    }

    pub fn stored_enrollment(&self, id: &str) -> Option<Enrollment> {
        lock(&self.state).enrollments.get(id).cloned()
    }

    fn record(
        &self,
        endpoint: &'static str,
        token: Option<&str>,
        detail: &str,
    ) -> Result<(), ApiError> {
        lock(&self.calls).push(BackendCall {
            endpoint,
            token: token.map(str::to_string),
            detail: detail.to_string(),
        });
        if lock(&self.state).failing.contains(endpoint) {
            return Err(ApiError::Network(format!("mock failure: {}", endpoint)));
        }
        Ok(())
    }
}

fn not_found(what: &str, id: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{} {} not found", what, id),
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.record("login", None, email)?;
        let state = lock(&self.state);
        match state.accounts.get(email) {
            Some((expected, user)) if expected == password => Ok(LoginResponse {
                user: Some(user.clone()),
                token: Some(format!("token-{}", user.id)),
            }),
            _ => Err(ApiError::Status {
                status: 401,
                message: "Invalid email or password".into(),
            }),
        }
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ApiError> {
        self.record("signup", None, email)?;
        let mut state = lock(&self.state);
        if state.accounts.contains_key(email) {
            return Err(ApiError::Status {
                status: 400,
                message: "Email already exists".into(),
            });
        }
        let id = state.next_id("user");
        let user = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: learnchain_types::CUSTOMER_ROLE.to_string(),
            wallet_address: None,
            enrollments: Vec::new(),
            certificates: Vec::new(),
            avt: None,
            birthday: None,
            numberphone: None,
        };
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        Ok(SignupResponse { user })
    }

    async fn list_courses(&self, limit: usize) -> Result<Vec<Course>, ApiError> {
        self.record("list_courses", None, &limit.to_string())?;
        let state = lock(&self.state);
        let mut courses: Vec<Course> = state.courses.values().cloned().collect();
        courses.sort_by(|a, b| a.id.cmp(&b.id));
        courses.truncate(limit);
        Ok(courses)
    }

    async fn list_bundles(&self, limit: usize) -> Result<Vec<Bundle>, ApiError> {
        self.record("list_bundles", None, &limit.to_string())?;
        let state = lock(&self.state);
        let mut bundles: Vec<Bundle> = state.bundles.values().cloned().collect();
        bundles.sort_by(|a, b| a.id.cmp(&b.id));
        bundles.truncate(limit);
        Ok(bundles)
    }

    async fn count_courses(&self) -> Result<u64, ApiError> {
        self.record("count_courses", None, "")?;
        Ok(lock(&self.state).courses.len() as u64)
    }

    async fn count_bundles(&self) -> Result<u64, ApiError> {
        self.record("count_bundles", None, "")?;
        Ok(lock(&self.state).bundles.len() as u64)
    }

    async fn course(&self, course_id: &str) -> Result<Course, ApiError> {
        self.record("course", None, course_id)?;
        lock(&self.state)
            .courses
            .get(course_id)
            .cloned()
            .ok_or_else(|| not_found("Course", course_id))
    }

    async fn bundle(&self, bundle_id: &str) -> Result<Bundle, ApiError> {
        self.record("bundle", None, bundle_id)?;
        lock(&self.state)
            .bundles
            .get(bundle_id)
            .cloned()
            .ok_or_else(|| not_found("Bundle", bundle_id))
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.record("search", None, query)?;
        let delay = lock(&self.state).search_delays.get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(lock(&self.state)
            .search_results
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn organizations_with_course_count(
        &self,
    ) -> Result<Vec<OrganizationCourseCount>, ApiError> {
        self.record("organizations_with_course_count", None, "")?;
        Ok(lock(&self.state).organization_counts.clone())
    }

    async fn organization(&self, organization_id: &str) -> Result<Organization, ApiError> {
        self.record("organization", None, organization_id)?;
        lock(&self.state)
            .organizations
            .get(organization_id)
            .cloned()
            .ok_or_else(|| not_found("Organization", organization_id))
    }

    async fn create_enrollment(
        &self,
        token: &str,
        user_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, ApiError> {
        self.record("create_enrollment", Some(token), course_id)?;
        let mut state = lock(&self.state);
        let id = state.next_id("enrollment");
        let enrollment = Enrollment {
            id: id.clone(),
            user: Some(user_id.to_string()),
            course: Some(course_id.to_string()),
            bundle: None,
            progress: 0.0,
            completed_items: Vec::new(),
            completed: false,
        };
        state.enrollments.insert(id, enrollment.clone());
        Ok(enrollment)
    }

    async fn create_bundle_enrollment(
        &self,
        token: &str,
        user_id: &str,
        bundle_id: &str,
    ) -> Result<Enrollment, ApiError> {
        self.record("create_bundle_enrollment", Some(token), bundle_id)?;
        let mut state = lock(&self.state);
        let id = state.next_id("enrollment");
        let enrollment = Enrollment {
            id: id.clone(),
            user: Some(user_id.to_string()),
            course: None,
            bundle: Some(bundle_id.to_string()),
            progress: 100.0,
            completed_items: Vec::new(),
            completed: true,
        };
        state.enrollments.insert(id, enrollment.clone());
        Ok(enrollment)
    }

    async fn update_enrollment(
        &self,
        token: &str,
        enrollment_id: &str,
        update: &EnrollmentUpdate,
    ) -> Result<Enrollment, ApiError> {
        self.record("update_enrollment", Some(token), enrollment_id)?;
        let mut state = lock(&self.state);
        let enrollment = state
            .enrollments
            .get_mut(enrollment_id)
            .ok_or_else(|| not_found("Enrollment", enrollment_id))?;
        enrollment.completed_items = update.completed_items.clone();
        enrollment.progress = update.progress;
        Ok(enrollment.clone())
    }

    async fn user_enrollments(&self, user_id: &str) -> Result<Vec<EnrollmentDetail>, ApiError> {
        self.record("user_enrollments", None, user_id)?;
        Ok(lock(&self.state).enrollment_details.clone())
    }

    async fn submit_quiz(
        &self,
        token: &str,
        submission: &QuizSubmission,
    ) -> Result<QuizResult, ApiError> {
        self.record("submit_quiz", Some(token), &submission.course_id)?;
        let mut state = lock(&self.state);
        state.submissions.push(submission.clone());
        let id = state.next_id("quiz-result");
        Ok(QuizResult {
            id: Some(id),
            score: state.quiz_score,
            user: Some(submission.user_id.clone()),
            course: Some(submission.course_id.clone()),
        })
    }

    async fn quiz_results(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Vec<QuizResult>, ApiError> {
        self.record("quiz_results", None, &format!("{}/{}", user_id, course_id))?;
        Ok(lock(&self.state).quiz_results.clone())
    }

    async fn create_certificate(
        &self,
        token: &str,
        request: &CourseCertificateRequest,
    ) -> Result<IssuedCertificate, ApiError> {
        self.record("create_certificate", Some(token), &request.course)?;
        let mut state = lock(&self.state);
        let id = state.next_id("certificate");
        let certificate = Certificate {
            id,
            user: Some(request.user.clone()),
            organization: Some(request.organization.clone()),
            course: Some(request.course.clone()),
            bundle: None,
            score: Some(request.score),
            created_at: None,
        };
        state.certificates.push(certificate.clone());
        Ok(IssuedCertificate {
            certificate: Some(certificate),
        })
    }

    async fn create_bundle_certificate(
        &self,
        token: &str,
        request: &BundleCertificateRequest,
    ) -> Result<IssuedCertificate, ApiError> {
        self.record("create_bundle_certificate", Some(token), &request.bundle)?;
        let mut state = lock(&self.state);
        let id = state.next_id("certificate");
        let certificate = Certificate {
            id,
            user: Some(request.user.clone()),
            organization: Some(request.organization.clone()),
            course: None,
            bundle: Some(request.bundle.clone()),
            score: None,
            created_at: None,
        };
        state.certificates.push(certificate.clone());
        Ok(IssuedCertificate {
            certificate: Some(certificate),
        })
    }

    async fn student_certificates(&self, user_id: &str) -> Result<Vec<Certificate>, ApiError> {
        self.record("student_certificates", None, user_id)?;
        Ok(lock(&self.state).certificates.clone())
    }

    async fn update_profile(
        &self,
        token: &str,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        self.record("update_profile", Some(token), user_id)?;
        let mut state = lock(&self.state);
        let (_, user) = state
            .accounts
            .values_mut()
            .find(|(_, u)| u.id == user_id)
            .ok_or_else(|| not_found("User", user_id))?;
        user.name = update.name.clone();
        user.email = update.email.clone();
        user.birthday = update.birthday.clone();
        user.numberphone = update.numberphone.clone();
        if let Some(avatar) = &update.avatar {
            user.avt = Some(format!("https://cdn.example.test/{}", avatar.file_name));
        }
        Ok(user.clone())
    }
}
