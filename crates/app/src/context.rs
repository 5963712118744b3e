// Path: crates/app/src/context.rs

use crate::payment::PaymentLedger;
use crate::session::SessionStore;
use learnchain_api::{BackendApi, ContractBridge, LocalStorage, StorageKey, WalletConnector};
use learnchain_types::config::ClientConfig;
use learnchain_types::error::{ApiError, FlowError};
use learnchain_types::User;
use std::sync::Arc;

/// Everything a view-model needs: the session it mutates and the services it calls.
///
/// One context lives for the whole process and is lent to view-model actions as
/// `&mut AppContext`, which serializes session mutations.
pub struct AppContext {
    pub session: SessionStore,
    pub backend: Arc<dyn BackendApi>,
    pub contract: Arc<dyn ContractBridge>,
    pub wallet: Arc<dyn WalletConnector>,
    pub storage: Arc<dyn LocalStorage>,
    pub config: ClientConfig,
}

impl AppContext {
    pub fn new(
        config: ClientConfig,
        backend: Arc<dyn BackendApi>,
        contract: Arc<dyn ContractBridge>,
        wallet: Arc<dyn WalletConnector>,
        storage: Arc<dyn LocalStorage>,
    ) -> Self {
        Self {
            session: SessionStore::new(),
            backend,
            contract,
            wallet,
            storage,
            config,
        }
    }

    pub fn user(&self) -> Result<&User, FlowError> {
        self.session.user().ok_or(FlowError::NotAuthenticated)
    }

    /// The stored bearer token, required by every backend write.
    pub async fn token(&self) -> Result<String, FlowError> {
        self.storage
            .get(StorageKey::Token)
            .await?
            .filter(|t| !t.is_empty())
            .ok_or(FlowError::Api(ApiError::MissingToken))
    }

    pub fn ledger(&self) -> PaymentLedger {
        PaymentLedger::new(self.storage.clone())
    }
}
