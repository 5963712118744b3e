// Path: crates/app/src/view.rs

use learnchain_types::EntityId;
use std::fmt;

/// Load state of a view-model's data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainTab {
    Home,
    MyCourses,
    Profile,
}

/// Every screen of the client, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Home,
    Main(MainTab),
    BundleDetail { id: EntityId },
    CourseDetail { id: EntityId },
    OrganizationDetail { id: EntityId },
    /// `reload` asks the screen to refetch quiz results, e.g. after a failed attempt.
    LearnCourse { id: EntityId, reload: bool },
    DocumentDetail { course_id: EntityId, document_id: EntityId },
    FinalTest { course_id: EntityId },
    SearchPage { query: String },
    Connect,
    NotFound,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "Login"),
            Route::Signup => write!(f, "Signup"),
            Route::Home => write!(f, "Home"),
            Route::Main(tab) => write!(f, "Main/{:?}", tab),
            Route::BundleDetail { id } => write!(f, "BundleDetail({})", id),
            Route::CourseDetail { id } => write!(f, "CourseDetail({})", id),
            Route::OrganizationDetail { id } => write!(f, "OrganizationDetail({})", id),
            Route::LearnCourse { id, reload } => write!(f, "LearnCourse({}, reload={})", id, reload),
            Route::DocumentDetail {
                course_id,
                document_id,
            } => write!(f, "DocumentDetail({}/{})", course_id, document_id),
            Route::FinalTest { course_id } => write!(f, "FinalTest({})", course_id),
            Route::SearchPage { query } => write!(f, "SearchPage({:?})", query),
            Route::Connect => write!(f, "Connect"),
            Route::NotFound => write!(f, "NotFound"),
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Shown on the current screen.
    Inline(String),
    /// A modal dialog.
    Alert { title: String, body: String },
}

impl Notice {
    pub fn inline(message: impl Into<String>) -> Self {
        Notice::Inline(message.into())
    }

    pub fn alert(title: impl Into<String>, body: impl Into<String>) -> Self {
        Notice::Alert {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Inline(message) => message,
            Notice::Alert { body, .. } => body,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Inline(message) => write!(f, "{}", message),
            Notice::Alert { title, body } => write!(f, "{}: {}", title, body),
        }
    }
}

/// What an action asks the host to do next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Effect {
    pub navigate: Option<Route>,
    pub notice: Option<Notice>,
}

impl Effect {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            navigate: Some(route),
            notice: None,
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            navigate: None,
            notice: Some(notice),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
