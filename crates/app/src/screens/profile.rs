// Path: crates/app/src/screens/profile.rs

use super::failure_message;
use crate::context::AppContext;
use crate::view::{Effect, Notice, ViewState};
use learnchain_types::error::FlowError;
use learnchain_types::{AvatarUpload, Certificate, ProfileUpdate};

pub const PROFILE_UPDATED: &str = "Profile updated successfully";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";

/// The profile tab: earned certificates and the edit form.
#[derive(Debug)]
pub struct ProfileScreen {
    pub certificates: ViewState<Vec<Certificate>>,
    pub form: ProfileUpdate,
    page: usize,
    shown: usize,
}

impl ProfileScreen {
    pub fn new(page: usize) -> Self {
        Self {
            certificates: ViewState::Loading,
            form: ProfileUpdate::default(),
            page: page.max(1),
            shown: page.max(1),
        }
    }

    pub fn for_context(ctx: &AppContext) -> Self {
        let mut screen = Self::new(ctx.config.catalog.certificates_page);
        screen.reset_form(ctx);
        screen
    }

    /// Seeds the form from the session's user.
    pub fn reset_form(&mut self, ctx: &AppContext) {
        if let Some(user) = ctx.session.user() {
            self.form = ProfileUpdate::from_user(user);
        }
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        let Some(user) = ctx.session.user() else {
            self.certificates = ViewState::Failed("Not logged in".to_string());
            return;
        };
        self.certificates = match ctx.backend.student_certificates(&user.id).await {
            Ok(list) => ViewState::Loaded(list),
            Err(e) => {
                tracing::warn!(target: "screen::profile", error = %e, "certificates failed to load");
                ViewState::Failed(e.to_string())
            }
        };
        self.shown = self.page;
    }

    pub fn visible_certificates(&self) -> &[Certificate] {
        match self.certificates.loaded() {
            Some(list) => list.get(..self.shown).unwrap_or(list),
            None => &[],
        }
    }

    pub fn can_show_more(&self) -> bool {
        self.certificates
            .loaded()
            .is_some_and(|list| self.shown < list.len())
    }

    pub fn show_more(&mut self) {
        if self.can_show_more() {
            self.shown += self.page;
        }
    }

    pub fn set_avatar(&mut self, avatar: AvatarUpload) {
        self.form.avatar = Some(avatar);
    }

    /// Sends the form; on success the returned user replaces the session's.
    pub async fn submit(&mut self, ctx: &mut AppContext) -> Effect {
        match self.save(ctx).await {
            Ok(()) => Effect::notice(Notice::alert("Success", PROFILE_UPDATED)),
            Err(e) => {
                tracing::error!(target: "screen::profile", error = %e, "profile update failed");
                Effect::notice(Notice::alert(
                    "Error",
                    failure_message(&e, PROFILE_UPDATE_FAILED),
                ))
            }
        }
    }

    async fn save(&mut self, ctx: &mut AppContext) -> Result<(), FlowError> {
        let user_id = ctx.user()?.id.clone();
        let token = ctx.token().await?;
        let updated = ctx
            .backend
            .update_profile(&token, &user_id, &self.form)
            .await?;
        // Keep local enrollments and certificates when the response omits them.
        let mut user = updated;
        if let Some(current) = ctx.session.user() {
            if user.enrollments.is_empty() {
                user.enrollments = current.enrollments.clone();
            }
            if user.certificates.is_empty() {
                user.certificates = current.certificates.clone();
            }
            if user.wallet_address.is_none() {
                user.wallet_address = current.wallet_address.clone();
            }
        }
        ctx.session.update_user(user);
        self.form.avatar = None;
        Ok(())
    }
}
