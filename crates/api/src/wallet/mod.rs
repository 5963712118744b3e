// Path: crates/api/src/wallet/mod.rs

use async_trait::async_trait;
use learnchain_types::chain::Address;
use learnchain_types::error::WalletError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// An EIP-1193 style request interface: `request({ method, params })`.
///
/// Wallet providers sign and submit transactions on the user's behalf; plain node
/// endpoints answer read-only calls through the same interface.
#[async_trait]
pub trait Eip1193Provider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;
}

/// An established wallet connection.
#[derive(Clone)]
pub struct WalletSession {
    pub address: Address,
    pub provider: Arc<dyn Eip1193Provider>,
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// The wallet-connect surface: connection state plus connect/disconnect actions.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Opens (or reuses) a wallet session.
    async fn connect(&self) -> Result<WalletSession, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// The current session, if connected.
    fn session(&self) -> Option<WalletSession>;

    fn is_connected(&self) -> bool {
        self.session().is_some()
    }
}
