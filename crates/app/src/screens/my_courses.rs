// Path: crates/app/src/screens/my_courses.rs

use crate::context::AppContext;
use crate::view::{Route, ViewState};
use learnchain_types::EnrollmentDetail;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrollmentFilter {
    #[default]
    All,
    Completed,
    NotCompleted,
    Bundle,
    Course,
}

impl EnrollmentFilter {
    pub fn matches(&self, detail: &EnrollmentDetail) -> bool {
        match self {
            EnrollmentFilter::All => true,
            EnrollmentFilter::Completed => detail.completed,
            EnrollmentFilter::NotCompleted => !detail.completed,
            EnrollmentFilter::Bundle => detail.bundle.is_some(),
            EnrollmentFilter::Course => detail.course.is_some() && detail.bundle.is_none(),
        }
    }
}

impl FromStr for EnrollmentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(EnrollmentFilter::All),
            "completed" => Ok(EnrollmentFilter::Completed),
            "notCompleted" => Ok(EnrollmentFilter::NotCompleted),
            "bundle" => Ok(EnrollmentFilter::Bundle),
            "course" => Ok(EnrollmentFilter::Course),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}

impl fmt::Display for EnrollmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnrollmentFilter::All => "all",
            EnrollmentFilter::Completed => "completed",
            EnrollmentFilter::NotCompleted => "notCompleted",
            EnrollmentFilter::Bundle => "bundle",
            EnrollmentFilter::Course => "course",
        };
        f.write_str(name)
    }
}

/// The "My Courses" tab.
#[derive(Debug, Default)]
pub struct MyCoursesScreen {
    pub state: ViewState<Vec<EnrollmentDetail>>,
    pub filter: EnrollmentFilter,
    pub query: String,
}

impl MyCoursesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        let Some(user) = ctx.session.user() else {
            self.state = ViewState::Failed("Not logged in".to_string());
            return;
        };
        self.state = match ctx.backend.user_enrollments(&user.id).await {
            Ok(list) => ViewState::Loaded(list),
            Err(e) => {
                tracing::warn!(target: "screen::my_courses", error = %e, "enrollments failed to load");
                ViewState::Failed(e.to_string())
            }
        };
    }

    /// Enrollments passing the filter whose title contains the query, ignoring case.
    pub fn visible(&self) -> Vec<&EnrollmentDetail> {
        let needle = self.query.trim().to_lowercase();
        self.state
            .loaded()
            .map(|list| {
                list.iter()
                    .filter(|d| self.filter.matches(d))
                    .filter(|d| needle.is_empty() || d.title().to_lowercase().contains(&needle))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn open(&self, detail: &EnrollmentDetail) -> Option<Route> {
        if let Some(bundle) = &detail.bundle {
            return Some(Route::BundleDetail {
                id: bundle.id.clone(),
            });
        }
        detail.course.as_ref().map(|c| Route::LearnCourse {
            id: c.id.clone(),
            reload: false,
        })
    }
}
