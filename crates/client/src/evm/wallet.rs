// Path: crates/client/src/evm/wallet.rs

use super::provider::METHOD_NOT_FOUND;
use async_trait::async_trait;
use learnchain_api::{Eip1193Provider, WalletConnector, WalletSession};
use learnchain_types::chain::Address;
use learnchain_types::error::WalletError;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Connects to whatever account the provider exposes first.
pub struct RpcWalletConnector {
    provider: Arc<dyn Eip1193Provider>,
    session: Mutex<Option<WalletSession>>,
}

impl RpcWalletConnector {
    pub fn new(provider: Arc<dyn Eip1193Provider>) -> Self {
        Self {
            provider,
            session: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<WalletSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn request_accounts(&self) -> Result<Value, WalletError> {
        match self.provider.request("eth_requestAccounts", json!([])).await {
            // Plain nodes do not implement the interactive method.
            Err(WalletError::Provider { code, .. }) if code == METHOD_NOT_FOUND => {
                self.provider.request("eth_accounts", json!([])).await
            }
            other => other,
        }
    }
}

#[async_trait]
impl WalletConnector for RpcWalletConnector {
    async fn connect(&self) -> Result<WalletSession, WalletError> {
        if let Some(existing) = self.slot().clone() {
            return Ok(existing);
        }

        let accounts = self.request_accounts().await?;
        let first = accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .ok_or(WalletError::NoAccounts)?;
        let address: Address = first
            .parse()
            .map_err(|_| WalletError::Transport(format!("provider returned bad account {}", first)))?;

        let session = WalletSession {
            address,
            provider: self.provider.clone(),
        };
        *self.slot() = Some(session.clone());
        tracing::info!(target: "wallet", %address, "wallet connected");
        Ok(session)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        if self.slot().take().is_some() {
            tracing::info!(target: "wallet", "wallet disconnected");
        }
        Ok(())
    }

    fn session(&self) -> Option<WalletSession> {
        self.slot().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnchain_api::mock::MockProvider;

    const ACCOUNT: &str = "0x00000000000000000000000000000000000000aa";

    #[tokio::test]
    async fn falls_back_to_eth_accounts_on_plain_nodes() {
        let provider = Arc::new(
            MockProvider::new()
                .respond(
                    "eth_requestAccounts",
                    Err(WalletError::Provider {
                        code: METHOD_NOT_FOUND,
                        message: "method not found".into(),
                    }),
                )
                .respond("eth_accounts", Ok(json!([ACCOUNT]))),
        );
        let connector = RpcWalletConnector::new(provider.clone());

        let session = connector.connect().await.unwrap();
        assert_eq!(session.address.to_string(), ACCOUNT);
        assert!(connector.is_connected());

        // A second connect reuses the session.
        connector.connect().await.unwrap();
        assert_eq!(provider.requests_for("eth_requestAccounts").len(), 1);

        connector.disconnect().await.unwrap();
        assert!(connector.session().is_none());
    }

    #[tokio::test]
    async fn rejection_is_not_retried() {
        let provider = Arc::new(
            MockProvider::new()
                .respond("eth_requestAccounts", Err(WalletError::Rejected("denied".into())))
                .respond("eth_accounts", Ok(json!([ACCOUNT]))),
        );
        let connector = RpcWalletConnector::new(provider.clone());
        assert_eq!(
            connector.connect().await.unwrap_err(),
            WalletError::Rejected("denied".into())
        );
        assert!(provider.requests_for("eth_accounts").is_empty());
        assert!(!connector.is_connected());
    }

    #[tokio::test]
    async fn empty_account_list_is_no_accounts() {
        let provider = Arc::new(MockProvider::new().respond("eth_requestAccounts", Ok(json!([]))));
        let connector = RpcWalletConnector::new(provider);
        assert_eq!(connector.connect().await.unwrap_err(), WalletError::NoAccounts);
    }
}
