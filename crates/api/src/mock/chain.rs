// Path: crates/api/src/mock/chain.rs

use super::lock;
use crate::contract::{ContractBridge, CoursePayment, PaymentReceipt, TxStatus};
use crate::wallet::{Eip1193Provider, WalletConnector, WalletSession};
use async_trait::async_trait;
use learnchain_types::chain::Address;
use learnchain_types::error::{ContractError, WalletError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Answers requests from a per-method table and records every call.
#[derive(Debug, Default)]
pub struct MockProvider {
    responses: Mutex<HashMap<String, Result<Value, WalletError>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: &str, result: Result<Value, WalletError>) -> Self {
        lock(&self.responses).insert(method.to_string(), result);
        self
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        lock(&self.requests).clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<Value> {
        lock(&self.requests)
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl Eip1193Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        lock(&self.requests).push((method.to_string(), params));
        lock(&self.responses)
            .get(method)
            .cloned()
            .unwrap_or_else(|| {
                Err(WalletError::Provider {
                    code: -32601,
                    message: format!("method {} not mocked", method),
                })
            })
    }
}

/// Hands out a fixed session, or a fixed error.
pub struct MockWalletConnector {
    address: Address,
    provider: Arc<dyn Eip1193Provider>,
    connect_error: Mutex<Option<WalletError>>,
    session: Mutex<Option<WalletSession>>,
}

impl MockWalletConnector {
    pub fn new(address: Address, provider: Arc<dyn Eip1193Provider>) -> Self {
        Self {
            address,
            provider,
            connect_error: Mutex::new(None),
            session: Mutex::new(None),
        }
    }

    /// A connector that is already connected.
    pub fn connected(address: Address, provider: Arc<dyn Eip1193Provider>) -> Self {
        let connector = Self::new(address, provider);
        let session = WalletSession {
            address: connector.address,
            provider: connector.provider.clone(),
        };
        *lock(&connector.session) = Some(session);
        connector
    }

    /// Makes the next connect attempts fail with `error`.
    pub fn refuse_with(self, error: WalletError) -> Self {
        *lock(&self.connect_error) = Some(error);
        self
    }
}

#[async_trait]
impl WalletConnector for MockWalletConnector {
    async fn connect(&self) -> Result<WalletSession, WalletError> {
        if let Some(err) = lock(&self.connect_error).clone() {
            return Err(err);
        }
        let session = WalletSession {
            address: self.address,
            provider: self.provider.clone(),
        };
        *lock(&self.session) = Some(session.clone());
        Ok(session)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        *lock(&self.session) = None;
        Ok(())
    }

    fn session(&self) -> Option<WalletSession> {
        lock(&self.session).clone()
    }
}

/// Records payments and answers with a scripted receipt.
#[derive(Debug)]
pub struct MockContractBridge {
    receipt: Mutex<PaymentReceipt>,
    total_certificates: Mutex<Result<String, ContractError>>,
    payments: Mutex<Vec<CoursePayment>>,
    statuses: Mutex<HashMap<String, TxStatus>>,
    status_checks: Mutex<Vec<String>>,
}

impl Default for MockContractBridge {
    fn default() -> Self {
        Self {
            receipt: Mutex::new(PaymentReceipt::confirmed("0xfeed".to_string())),
            total_certificates: Mutex::new(Ok("0".to_string())),
            payments: Mutex::new(Vec::new()),
            statuses: Mutex::new(HashMap::new()),
            status_checks: Mutex::new(Vec::new()),
        }
    }
}

impl MockContractBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_receipt(self, receipt: PaymentReceipt) -> Self {
        *lock(&self.receipt) = receipt;
        self
    }

    pub fn with_total_certificates(self, total: Result<String, ContractError>) -> Self {
        *lock(&self.total_certificates) = total;
        self
    }

    pub fn set_receipt(&self, receipt: PaymentReceipt) {
        *lock(&self.receipt) = receipt;
    }

    pub fn payments(&self) -> Vec<CoursePayment> {
        lock(&self.payments).clone()
    }

    /// Unknown hashes report [`TxStatus::Pending`].
    pub fn set_status(&self, tx_hash: &str, status: TxStatus) {
        lock(&self.statuses).insert(tx_hash.to_string(), status);
    }

    pub fn status_checks(&self) -> Vec<String> {
        lock(&self.status_checks).clone()
    }
}

#[async_trait]
impl ContractBridge for MockContractBridge {
    async fn pay_for_course(
        &self,
        _provider: &dyn Eip1193Provider,
        payment: &CoursePayment,
    ) -> PaymentReceipt {
        lock(&self.payments).push(payment.clone());
        lock(&self.receipt).clone()
    }

    async fn transaction_status(
        &self,
        _provider: &dyn Eip1193Provider,
        tx_hash: &str,
    ) -> Result<TxStatus, ContractError> {
        lock(&self.status_checks).push(tx_hash.to_string());
        Ok(lock(&self.statuses)
            .get(tx_hash)
            .copied()
            .unwrap_or(TxStatus::Pending))
    }

    async fn read_total_certificates(&self) -> Result<String, ContractError> {
        lock(&self.total_certificates).clone()
    }
}
