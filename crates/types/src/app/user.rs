// Path: crates/types/src/app/user.rs

use super::{Certificate, Enrollment, EntityId};
use serde::{Deserialize, Serialize};

/// Only this role may sign in from the client.
pub const CUSTOMER_ROLE: &str = "customer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numberphone: Option<String>,
}

impl User {
    pub fn is_customer(&self) -> bool {
        self.role == CUSTOMER_ROLE
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` answers with the user and a bearer token. Either may be missing on
/// a malformed response, which the login screen reports instead of failing to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub user: User,
}

/// Avatar file attached to a profile update.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart form of `PUT /users/change-infor/{id}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub birthday: Option<String>,
    pub numberphone: Option<String>,
    pub avatar: Option<AvatarUpload>,
}

impl ProfileUpdate {
    /// Seeds the form with the user's current values.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            birthday: user.birthday.clone(),
            numberphone: user.numberphone.clone(),
            avatar: None,
        }
    }
}
