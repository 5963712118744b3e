// Path: crates/app/src/screens/search.rs

use crate::context::AppContext;
use crate::search::{SearchController, SearchOutcome};
use crate::view::{Route, ViewState};
use learnchain_types::{OrganizationCourseCount, SearchResults};

/// Full search results with an organization filter. Unlike the dropdown, the page
/// keeps every match, so the filter sees all of them.
pub struct SearchScreen {
    pub controller: SearchController,
    pub organizations: ViewState<Vec<OrganizationCourseCount>>,
    query: String,
    /// `None` shows every organization.
    organization: Option<String>,
}

impl SearchScreen {
    pub fn new(ctx: &AppContext, query: impl Into<String>) -> Self {
        Self {
            controller: SearchController::unbounded(
                ctx.backend.clone(),
                ctx.config.search_debounce(),
            ),
            organizations: ViewState::Loading,
            query: query.into(),
            organization: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Loads the organization list, then runs the query the page was opened with.
    pub async fn load(&mut self, ctx: &AppContext) -> SearchOutcome {
        self.organizations = match ctx.backend.organizations_with_course_count().await {
            Ok(list) => ViewState::Loaded(list),
            Err(e) => {
                tracing::warn!(target: "screen::search", error = %e, "organizations failed to load");
                ViewState::Failed(e.to_string())
            }
        };
        self.controller.input(&self.query).await
    }

    pub async fn set_query(&mut self, text: &str) -> SearchOutcome {
        self.query = text.to_string();
        self.controller.input(text).await
    }

    /// Accepts `"all"` as well as an organization id.
    pub fn set_organization(&mut self, organization: Option<&str>) {
        self.organization = organization
            .filter(|o| !o.is_empty() && *o != "all")
            .map(str::to_string);
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn visible(&self) -> SearchResults {
        self.controller
            .results()
            .filter_by_organization(self.organization.as_deref())
    }

    pub fn open_course(&self, course_id: &str) -> Route {
        Route::CourseDetail {
            id: course_id.to_string(),
        }
    }

    pub fn open_bundle(&self, bundle_id: &str) -> Route {
        Route::BundleDetail {
            id: bundle_id.to_string(),
        }
    }
}
