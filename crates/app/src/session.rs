// Path: crates/app/src/session.rs

//! The in-memory session: at most one logged-in user.
//!
//! Every mutation is synchronous and infallible. Mutations on an empty store are no-ops,
//! and the last write wins.

use learnchain_types::{Certificate, Enrollment, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    user: Option<User>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    /// Replaces the whole user object, e.g. after a profile update.
    pub fn update_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn add_enrollment(&mut self, enrollment: Enrollment) {
        if let Some(user) = self.user.as_mut() {
            user.enrollments.push(enrollment);
        }
    }

    /// Replaces the enrollment with the same id. Unknown ids are ignored.
    pub fn update_enrollment(&mut self, enrollment: Enrollment) {
        if let Some(user) = self.user.as_mut() {
            for existing in user.enrollments.iter_mut() {
                if existing.id == enrollment.id {
                    *existing = enrollment.clone();
                }
            }
        }
    }

    pub fn complete_enrollment(&mut self, enrollment_id: &str) {
        if let Some(user) = self.user.as_mut() {
            for existing in user.enrollments.iter_mut() {
                if existing.id == enrollment_id {
                    existing.completed = true;
                }
            }
        }
    }

    pub fn add_certificate(&mut self, certificate: Certificate) {
        if let Some(user) = self.user.as_mut() {
            user.certificates.push(certificate);
        }
    }

    pub fn set_wallet_address(&mut self, address: Option<String>) {
        if let Some(user) = self.user.as_mut() {
            user.wallet_address = address;
        }
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.wallet_address.as_deref())
            .filter(|a| !a.trim().is_empty())
    }

    pub fn enrollment_for_course(&self, course_id: &str) -> Option<&Enrollment> {
        self.user
            .as_ref()
            .and_then(|u| u.enrollments.iter().find(|e| e.is_for_course(course_id)))
    }

    pub fn enrollment_for_bundle(&self, bundle_id: &str) -> Option<&Enrollment> {
        self.user
            .as_ref()
            .and_then(|u| u.enrollments.iter().find(|e| e.is_for_bundle(bundle_id)))
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrollment_for_course(course_id).is_some()
    }

    pub fn has_bundle_certificate(&self, bundle_id: &str) -> bool {
        self.user.as_ref().is_some_and(|u| {
            u.certificates
                .iter()
                .any(|c| c.bundle.as_deref() == Some(bundle_id))
        })
    }
}
