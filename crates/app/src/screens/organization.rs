// Path: crates/app/src/screens/organization.rs

use crate::context::AppContext;
use crate::view::ViewState;
use learnchain_types::{EntityId, Organization};

#[derive(Debug)]
pub struct OrganizationScreen {
    pub id: EntityId,
    pub state: ViewState<Organization>,
}

impl OrganizationScreen {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            state: ViewState::Loading,
        }
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = match ctx.backend.organization(&self.id).await {
            Ok(org) => ViewState::Loaded(org),
            Err(e) => {
                tracing::warn!(target: "screen::organization", organization = %self.id, error = %e, "organization failed to load");
                ViewState::Failed(e.to_string())
            }
        };
    }
}
