// Path: crates/types/src/app/organization.rs

use super::EntityId;
use serde::{Deserialize, Serialize};

/// A course or bundle provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Organization {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Payment recipient for course purchases. The backend spells the key in lower case.
    #[serde(default, rename = "walletaddress", skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl Organization {
    /// The configured payment address, ignoring blank values.
    pub fn payment_address(&self) -> Option<&str> {
        self.wallet_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// Organization summary returned by `GET /organization/courses-count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCourseCount {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub course_count: u64,
}

/// Some endpoints populate the organization, others return only its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrganizationRef {
    Populated(Organization),
    Id(EntityId),
}

impl OrganizationRef {
    pub fn id(&self) -> &str {
        match self {
            OrganizationRef::Populated(org) => &org.id,
            OrganizationRef::Id(id) => id,
        }
    }

    pub fn populated(&self) -> Option<&Organization> {
        match self {
            OrganizationRef::Populated(org) => Some(org),
            OrganizationRef::Id(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        self.populated().map(|o| o.name.as_str()).unwrap_or_default()
    }
}

impl Default for OrganizationRef {
    fn default() -> Self {
        OrganizationRef::Id(String::new())
    }
}
