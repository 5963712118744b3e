// Path: crates/app/src/screens/auth.rs

use super::failure_message;
use crate::context::AppContext;
use crate::payment::reconcile_pending;
use crate::view::{Effect, MainTab, Notice, Route};
use learnchain_api::StorageKey;
use learnchain_types::error::FlowError;

pub const LOGIN_FAILED: &str = "Login Failed";
pub const CUSTOMERS_ONLY: &str = "Only customers can login from mobile.";
pub const USER_NOT_FOUND: &str = "User data not found.";
const LOGIN_FALLBACK: &str = "Something went wrong";
const SIGNUP_FALLBACK: &str = "An error occurred";

/// Authenticates, stores the bearer token and opens the main tabs.
///
/// Only `customer` accounts are accepted. After a successful login, payments left
/// pending by an earlier session are reconciled.
pub async fn login(ctx: &mut AppContext, email: &str, password: &str) -> Effect {
    let response = match ctx.backend.login(email, password).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(target: "screen::auth", error = %e, "login rejected");
            let body = failure_message(&FlowError::Api(e), LOGIN_FALLBACK);
            return Effect::notice(Notice::alert(LOGIN_FAILED, body));
        }
    };

    let Some(user) = response.user else {
        return Effect::notice(Notice::alert(LOGIN_FAILED, USER_NOT_FOUND));
    };
    if !user.is_customer() {
        tracing::info!(target: "screen::auth", role = %user.role, "non-customer login refused");
        return Effect::notice(Notice::alert(LOGIN_FAILED, CUSTOMERS_ONLY));
    }
    let Some(token) = response.token.filter(|t| !t.is_empty()) else {
        return Effect::notice(Notice::alert(LOGIN_FAILED, LOGIN_FALLBACK));
    };
    if let Err(e) = ctx.storage.set(StorageKey::Token, &token).await {
        tracing::error!(target: "screen::auth", error = %e, "could not store token");
        return Effect::notice(Notice::alert(LOGIN_FAILED, e.to_string()));
    }

    tracing::info!(target: "screen::auth", user = %user.id, "logged in");
    ctx.session.login(user);

    let mut effect = Effect::navigate(Route::Main(MainTab::Home));
    match reconcile_pending(ctx).await {
        Ok(report) if !report.enrolled.is_empty() => {
            effect = effect.with_notice(Notice::inline(format!(
                "Completed {} pending enrollment(s).",
                report.enrolled.len()
            )));
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(target: "screen::auth", error = %e, "reconciliation failed"),
    }
    effect
}

pub async fn signup(ctx: &mut AppContext, name: &str, email: &str, password: &str) -> Effect {
    match ctx.backend.signup(name, email, password).await {
        Ok(response) => {
            tracing::info!(target: "screen::auth", user = %response.user.id, "signed up");
            ctx.session.update_user(response.user);
            Effect::navigate(Route::Home)
        }
        Err(e) => {
            tracing::warn!(target: "screen::auth", error = %e, "signup rejected");
            let body = failure_message(&FlowError::Api(e), SIGNUP_FALLBACK);
            Effect::notice(Notice::alert("Error", body))
        }
    }
}

/// Clears the session and forgets the token.
pub async fn logout(ctx: &mut AppContext) -> Effect {
    ctx.session.logout();
    if let Err(e) = ctx.storage.remove(StorageKey::Token).await {
        tracing::warn!(target: "screen::auth", error = %e, "could not remove token");
    }
    Effect::navigate(Route::Login)
}
