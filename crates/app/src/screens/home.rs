// Path: crates/app/src/screens/home.rs

use crate::context::AppContext;
use crate::view::{Route, ViewState};
use learnchain_types::error::ApiError;
use learnchain_types::{Bundle, Course};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub bundles: Vec<Bundle>,
    pub total_courses: u64,
    pub total_bundles: u64,
}

/// Landing page: the first pages of courses and bundles, each growable by a page.
#[derive(Debug)]
pub struct HomeScreen {
    pub state: ViewState<Catalog>,
    page_size: usize,
    course_limit: usize,
    bundle_limit: usize,
}

impl HomeScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: ViewState::Loading,
            page_size,
            course_limit: page_size,
            bundle_limit: page_size,
        }
    }

    pub fn for_context(ctx: &AppContext) -> Self {
        Self::new(ctx.config.catalog.page_size)
    }

    pub fn course_limit(&self) -> usize {
        self.course_limit
    }

    pub fn bundle_limit(&self) -> usize {
        self.bundle_limit
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = ViewState::Loading;
        self.state = match self.fetch(ctx).await {
            Ok(catalog) => ViewState::Loaded(catalog),
            Err(e) => {
                tracing::warn!(target: "screen::home", error = %e, "catalog failed to load");
                ViewState::Failed(e.to_string())
            }
        };
    }

    async fn fetch(&self, ctx: &AppContext) -> Result<Catalog, ApiError> {
        let total_courses = ctx.backend.count_courses().await?;
        let total_bundles = ctx.backend.count_bundles().await?;
        let courses = ctx.backend.list_courses(self.course_limit).await?;
        let bundles = ctx.backend.list_bundles(self.bundle_limit).await?;
        Ok(Catalog {
            courses,
            bundles,
            total_courses,
            total_bundles,
        })
    }

    pub fn can_show_more_courses(&self) -> bool {
        self.state
            .loaded()
            .is_some_and(|c| (self.course_limit as u64) < c.total_courses)
    }

    pub fn can_show_more_bundles(&self) -> bool {
        self.state
            .loaded()
            .is_some_and(|c| (self.bundle_limit as u64) < c.total_bundles)
    }

    pub async fn show_more_courses(&mut self, ctx: &AppContext) {
        self.course_limit += self.page_size;
        self.refetch_courses(ctx).await;
    }

    pub async fn show_less_courses(&mut self, ctx: &AppContext) {
        self.course_limit = self.page_size;
        self.refetch_courses(ctx).await;
    }

    pub async fn show_more_bundles(&mut self, ctx: &AppContext) {
        self.bundle_limit += self.page_size;
        self.refetch_bundles(ctx).await;
    }

    pub async fn show_less_bundles(&mut self, ctx: &AppContext) {
        self.bundle_limit = self.page_size;
        self.refetch_bundles(ctx).await;
    }

    // A failed page fetch keeps the previous list.
    async fn refetch_courses(&mut self, ctx: &AppContext) {
        match ctx.backend.list_courses(self.course_limit).await {
            Ok(courses) => {
                if let Some(catalog) = self.state.loaded_mut() {
                    catalog.courses = courses;
                }
            }
            Err(e) => tracing::warn!(target: "screen::home", error = %e, "course page failed"),
        }
    }

    async fn refetch_bundles(&mut self, ctx: &AppContext) {
        match ctx.backend.list_bundles(self.bundle_limit).await {
            Ok(bundles) => {
                if let Some(catalog) = self.state.loaded_mut() {
                    catalog.bundles = bundles;
                }
            }
            Err(e) => tracing::warn!(target: "screen::home", error = %e, "bundle page failed"),
        }
    }

    pub fn open_search(&self, query: &str) -> Route {
        Route::SearchPage {
            query: query.to_string(),
        }
    }
}
