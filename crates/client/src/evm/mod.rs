// Path: crates/client/src/evm/mod.rs

//! Ethereum JSON-RPC adapters: provider, wallet connector, and the course-payment
//! contract bridge.

pub mod abi;
mod bridge;
mod provider;
mod wallet;

pub use bridge::EvmContractBridge;
pub use provider::{
    HttpRpcProvider, JsonRpcError, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND,
    USER_REJECTED,
};
pub use wallet::RpcWalletConnector;
