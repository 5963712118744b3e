// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo
    )
)]
//! # Learnchain Types
//!
//! Backend-owned domain entities as the client sees them, the error taxonomy
//! shared by every crate, on-chain primitives, and the client configuration.

/// Domain entities mirrored from the backend API.
pub mod app;
pub mod chain;
pub mod config;
pub mod error;

pub use app::*;
