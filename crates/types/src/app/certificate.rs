// Path: crates/types/src/app/certificate.rs

use super::EntityId;
use serde::{Deserialize, Serialize};

/// Issued by the backend for a passed course quiz or a completed bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub user: Option<EntityId>,
    #[serde(default)]
    pub organization: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST /certificates`.
#[derive(Debug, Clone, Serialize)]
pub struct CourseCertificateRequest {
    pub user: EntityId,
    pub organization: EntityId,
    pub course: EntityId,
    pub score: f64,
}

/// Body of `POST /certificates/createCertificateBunble`.
#[derive(Debug, Clone, Serialize)]
pub struct BundleCertificateRequest {
    pub user: EntityId,
    pub organization: EntityId,
    /// The backend route expects this exact (misspelled) key.
    #[serde(rename = "bunbles")]
    pub bundle: EntityId,
}

/// Envelope returned by the certificate endpoints; older routes omit it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuedCertificate {
    #[serde(default)]
    pub certificate: Option<Certificate>,
}
