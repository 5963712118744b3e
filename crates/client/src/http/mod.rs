// Path: crates/client/src/http/mod.rs

//! [`BackendApi`] over the platform's REST API.

use async_trait::async_trait;
use learnchain_api::BackendApi;
use learnchain_types::config::ClientConfig;
use learnchain_types::error::ApiError;
use learnchain_types::{
    Bundle, BundleCertificateRequest, BundleCount, Certificate, Course, CourseCertificateRequest,
    CourseCount, Enrollment, EnrollmentDetail, EnrollmentUpdate, IssuedCertificate, LoginRequest,
    LoginResponse, Organization, OrganizationCourseCount, ProfileUpdate, QuizResult,
    QuizSubmission, QuizSubmitResponse, SearchResults, SignupRequest, SignupResponse, User,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Error body shape used by the backend for every non-2xx answer.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        // A trailing slash makes `Url::join` append instead of replacing the last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalized)
            .map_err(|e| ApiError::InvalidRequest(format!("base url {}: {}", base_url, e)))?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidRequest(format!("{}: {}", path, e)))
    }

    /// `path` is a fixed route; each of `ids` becomes one percent-encoded segment, so an id
    /// can never reach another route.
    fn resource(&self, path: &str, ids: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = ids.iter().find(|id| matches!(**id, "" | "." | "..")) {
            return Err(ApiError::InvalidRequest(format!("invalid id {:?}", bad)));
        }
        let mut url = self.url(path)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest(format!("{}: not a hierarchical url", path)))?
            .extend(ids);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send(self.client.get(url)).await
    }

    async fn get_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        ids: &[&str],
    ) -> Result<T, ApiError> {
        let url = self.resource(path, ids)?;
        self.send(self.client.get(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            tracing::debug!(target: "http", status = status.as_u16(), %message, "backend rejected request");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let url = self.url("auth/login")?;
        self.send(self.client.post(url).json(&body)).await
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ApiError> {
        let body = SignupRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        };
        let url = self.url("auth/signup")?;
        self.send(self.client.post(url).json(&body)).await
    }

    async fn list_courses(&self, limit: usize) -> Result<Vec<Course>, ApiError> {
        let url = self.url("course")?;
        self.send(self.client.get(url).query(&[("limit", limit)]))
            .await
    }

    async fn list_bundles(&self, limit: usize) -> Result<Vec<Bundle>, ApiError> {
        let url = self.url("coursebundles")?;
        self.send(self.client.get(url).query(&[("limit", limit)]))
            .await
    }

    async fn count_courses(&self) -> Result<u64, ApiError> {
        let count: CourseCount = self.get("course/countCourse").await?;
        Ok(count.total_courses)
    }

    async fn count_bundles(&self) -> Result<u64, ApiError> {
        let count: BundleCount = self.get("coursebundles/countCourseBundle").await?;
        Ok(count.count)
    }

    async fn course(&self, course_id: &str) -> Result<Course, ApiError> {
        self.get_resource("course", &[course_id]).await
    }

    async fn bundle(&self, bundle_id: &str) -> Result<Bundle, ApiError> {
        self.get_resource("coursebundles/getid", &[bundle_id]).await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        let url = self.url("course/search")?;
        self.send(self.client.get(url).query(&[("query", query)]))
            .await
    }

    async fn organizations_with_course_count(
        &self,
    ) -> Result<Vec<OrganizationCourseCount>, ApiError> {
        self.get("organization/courses-count").await
    }

    async fn organization(&self, organization_id: &str) -> Result<Organization, ApiError> {
        self.get_resource("organization", &[organization_id]).await
    }

    async fn create_enrollment(
        &self,
        token: &str,
        user_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, ApiError> {
        let url = self.url("enrollment")?;
        let body = json!({ "user": user_id, "course": course_id });
        self.send(self.client.post(url).bearer_auth(token).json(&body))
            .await
    }

    async fn create_bundle_enrollment(
        &self,
        token: &str,
        user_id: &str,
        bundle_id: &str,
    ) -> Result<Enrollment, ApiError> {
        let url = self.url("enrollment/createBundleEnrollment")?;
        let body = json!({ "user": user_id, "bundle": bundle_id });
        self.send(self.client.post(url).bearer_auth(token).json(&body))
            .await
    }

    async fn update_enrollment(
        &self,
        token: &str,
        enrollment_id: &str,
        update: &EnrollmentUpdate,
    ) -> Result<Enrollment, ApiError> {
        let url = self.resource("enrollment", &[enrollment_id])?;
        self.send(self.client.put(url).bearer_auth(token).json(update))
            .await
    }

    async fn user_enrollments(&self, user_id: &str) -> Result<Vec<EnrollmentDetail>, ApiError> {
        self.get_resource("enrollment/userHaveBunbleAndCourse", &[user_id])
            .await
    }

    async fn submit_quiz(
        &self,
        token: &str,
        submission: &QuizSubmission,
    ) -> Result<QuizResult, ApiError> {
        let url = self.url("quiz/submit")?;
        let response: QuizSubmitResponse = self
            .send(self.client.post(url).bearer_auth(token).json(submission))
            .await?;
        Ok(response.quiz_result)
    }

    async fn quiz_results(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Vec<QuizResult>, ApiError> {
        self.get_resource("quiz/result/user", &[user_id, "course", course_id])
            .await
    }

    async fn create_certificate(
        &self,
        token: &str,
        request: &CourseCertificateRequest,
    ) -> Result<IssuedCertificate, ApiError> {
        let url = self.url("certificates")?;
        self.send(self.client.post(url).bearer_auth(token).json(request))
            .await
    }

    async fn create_bundle_certificate(
        &self,
        token: &str,
        request: &BundleCertificateRequest,
    ) -> Result<IssuedCertificate, ApiError> {
        let url = self.url("certificates/createCertificateBunble")?;
        self.send(self.client.post(url).bearer_auth(token).json(request))
            .await
    }

    async fn student_certificates(&self, user_id: &str) -> Result<Vec<Certificate>, ApiError> {
        self.get_resource("certificates/student", &[user_id]).await
    }

    async fn update_profile(
        &self,
        token: &str,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let mut form = Form::new()
            .text("name", update.name.clone())
            .text("email", update.email.clone());
        if let Some(birthday) = &update.birthday {
            form = form.text("birthday", birthday.clone());
        }
        if let Some(numberphone) = &update.numberphone {
            form = form.text("numberphone", numberphone.clone());
        }
        if let Some(avatar) = &update.avatar {
            let part = Part::bytes(avatar.bytes.clone())
                .file_name(avatar.file_name.clone())
                .mime_str(&avatar.mime_type)
                .map_err(|e| ApiError::InvalidRequest(format!("avatar mime type: {}", e)))?;
            form = form.part("avt", part);
        }
        let url = self.resource("users/change-infor", &[user_id])?;
        self.send(self.client.put(url).bearer_auth(token).multipart(form))
            .await
    }
}
