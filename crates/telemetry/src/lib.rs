// Path: crates/telemetry/src/lib.rs
#![forbid(unsafe_code)]
//! Logging setup shared by the learnchain binaries.

pub mod init;

pub use init::{init_tracing, LogFormat, TelemetryError};
