// Path: crates/api/src/lib.rs
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
//! # Learnchain API
//!
//! The seams between the client's view-models and the outside world. Production
//! implementations live in `learnchain-client`; in-memory doubles live in [`mock`].

pub mod backend;
pub mod contract;
pub mod storage;
pub mod wallet;

pub mod mock;

pub use backend::BackendApi;
pub use contract::{ContractBridge, CoursePayment, PaymentReceipt, TxStatus};
pub use storage::{LocalStorage, StorageKey};
pub use wallet::{Eip1193Provider, WalletConnector, WalletSession};

