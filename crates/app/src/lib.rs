// Path: crates/app/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Learnchain App
//!
//! The client's application layer: the session store, one view-model per screen, the
//! payment and enrollment flow, and debounced search. Everything talks to the outside
//! world through the traits in `learnchain-api`, so the same code runs against the
//! HTTP/JSON-RPC adapters or the in-memory mocks.

pub mod context;
pub mod payment;
pub mod pricing;
pub mod screens;
pub mod search;
pub mod session;
pub mod view;

pub use context::AppContext;
pub use payment::{join_course, reconcile_pending, PaymentLedger, PendingEnrollment, ReconcileReport};
pub use search::{SearchController, SearchOutcome};
pub use session::SessionStore;
pub use view::{Effect, MainTab, Notice, Route, ViewState};
