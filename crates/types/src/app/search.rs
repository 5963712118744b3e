// Path: crates/types/src/app/search.rs

use super::{Bundle, Course};
use serde::{Deserialize, Serialize};

/// `GET /course/search?query=`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.bundles.is_empty()
    }

    /// Keeps the first `n` courses and the first `n` bundles.
    pub fn top(mut self, n: usize) -> Self {
        self.courses.truncate(n);
        self.bundles.truncate(n);
        self
    }

    /// Restricts both lists to one organization. `None` keeps everything.
    pub fn filter_by_organization(&self, organization_id: Option<&str>) -> Self {
        match organization_id {
            None => self.clone(),
            Some(org) => Self {
                courses: self
                    .courses
                    .iter()
                    .filter(|c| c.organization.id() == org)
                    .cloned()
                    .collect(),
                bundles: self
                    .bundles
                    .iter()
                    .filter(|b| b.organization.id() == org)
                    .cloned()
                    .collect(),
            },
        }
    }
}
