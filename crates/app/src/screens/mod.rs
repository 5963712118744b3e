// Path: crates/app/src/screens/mod.rs

//! One view-model per screen. Each exposes its data as a [`crate::ViewState`], and its
//! actions return an [`crate::Effect`] instead of navigating.

pub mod auth;
pub mod bundle;
pub mod connect;
pub mod course;
pub mod document;
pub mod home;
pub mod learn;
pub mod my_courses;
pub mod organization;
pub mod profile;
pub mod quiz;
pub mod search;

use learnchain_types::error::FlowError;

/// The backend's own message when it sent one, else `fallback`.
pub(crate) fn failure_message(err: &FlowError, fallback: &str) -> String {
    match err {
        FlowError::Api(api) => api.user_message().unwrap_or(fallback).to_string(),
        _ => fallback.to_string(),
    }
}
