// Path: crates/client/src/lib.rs
//! # Learnchain Client Crate Lints
//!
//! Panics are disallowed in non-test code; every adapter reports failures through the
//! typed errors in `learnchain_types::error`.
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

//! # Learnchain Client
//!
//! Production implementations of the seams declared in `learnchain-api`: the REST
//! backend over HTTP, a JSON file for local storage, and an EVM JSON-RPC wallet and
//! contract bridge.

pub mod evm;
pub mod http;
pub mod storage;

pub use evm::{EvmContractBridge, HttpRpcProvider, RpcWalletConnector};
pub use http::HttpBackend;
pub use storage::FileStorage;
