// Path: crates/client/src/evm/bridge.rs

use super::abi::{self, Token};
use async_trait::async_trait;
use learnchain_api::{ContractBridge, CoursePayment, Eip1193Provider, PaymentReceipt, TxStatus};
use learnchain_types::chain::{Address, TxHash};
use learnchain_types::config::ClientConfig;
use learnchain_types::error::{ConfigError, ContractError, WalletError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// [`ContractBridge`] for the deployed course-payment contract.
///
/// Payments go through the caller's wallet provider; the certificate counter is read
/// through `reader`, which needs no accounts.
pub struct EvmContractBridge {
    contract: Address,
    reader: Arc<dyn Eip1193Provider>,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl EvmContractBridge {
    pub fn new(contract: Address, reader: Arc<dyn Eip1193Provider>) -> Self {
        Self {
            contract,
            reader,
            poll_interval: Duration::from_secs(2),
            timeout: None,
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        reader: Arc<dyn Eip1193Provider>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(config.contract_address()?, reader)
            .with_poll_interval(config.confirmation_poll_interval())
            .with_timeout(config.confirmation_timeout()))
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    async fn sender(provider: &dyn Eip1193Provider) -> Result<String, ContractError> {
        let accounts = provider.request("eth_accounts", json!([])).await?;
        accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ContractError::Wallet(WalletError::NoAccounts))
    }

    async fn submit(
        &self,
        provider: &dyn Eip1193Provider,
        payment: &CoursePayment,
    ) -> Result<TxHash, ContractError> {
        let from = Self::sender(provider).await?;
        let data = abi::encode_call(
            abi::PAY_FOR_COURSE,
            &[
                Token::String(payment.course_id.clone()),
                Token::String(payment.student_id.clone()),
                Token::String(payment.student_name.clone()),
                Token::Address(payment.organization),
                Token::String(payment.organization_name.clone()),
            ],
        );
        let tx = json!([{
            "from": from,
            "to": self.contract.to_string(),
            "data": abi::to_hex_data(&data),
            "value": payment.value.to_quantity(),
        }]);
        let hash = provider.request("eth_sendTransaction", tx).await?;
        hash.as_str()
            .map(str::to_string)
            .ok_or_else(|| ContractError::Decode(format!("transaction hash: {}", hash)))
    }

    async fn receipt_status(
        provider: &dyn Eip1193Provider,
        tx_hash: &str,
    ) -> Result<TxStatus, ContractError> {
        let receipt = provider
            .request("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        if receipt.is_null() {
            return Ok(TxStatus::Pending);
        }
        Ok(match receipt.get("status").and_then(Value::as_str) {
            Some("0x1") => TxStatus::Confirmed,
            _ => TxStatus::Reverted,
        })
    }

    async fn poll_receipt(
        &self,
        provider: &dyn Eip1193Provider,
        tx_hash: &str,
    ) -> Result<(), ContractError> {
        loop {
            match Self::receipt_status(provider, tx_hash).await? {
                TxStatus::Confirmed => return Ok(()),
                TxStatus::Reverted => return Err(ContractError::Reverted(tx_hash.to_string())),
                TxStatus::Pending => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }

    async fn wait_for_confirmation(
        &self,
        provider: &dyn Eip1193Provider,
        tx_hash: &str,
    ) -> Result<(), ContractError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.poll_receipt(provider, tx_hash))
                .await
                .map_err(|_| ContractError::ConfirmationTimeout(tx_hash.to_string()))?,
            None => self.poll_receipt(provider, tx_hash).await,
        }
    }
}

#[async_trait]
impl ContractBridge for EvmContractBridge {
    async fn pay_for_course(
        &self,
        provider: &dyn Eip1193Provider,
        payment: &CoursePayment,
    ) -> PaymentReceipt {
        let tx_hash = match self.submit(provider, payment).await {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(target: "evm", course = %payment.course_id, error = %e, "payment not submitted");
                return PaymentReceipt::failed(&e, None);
            }
        };
        tracing::info!(target: "evm", course = %payment.course_id, tx = %tx_hash, value = %payment.value, "payment submitted");

        match self.wait_for_confirmation(provider, &tx_hash).await {
            Ok(()) => {
                tracing::info!(target: "evm", tx = %tx_hash, "payment confirmed");
                PaymentReceipt::confirmed(tx_hash)
            }
            Err(e) => {
                tracing::warn!(target: "evm", tx = %tx_hash, error = %e, "payment not confirmed");
                PaymentReceipt::failed(&e, Some(tx_hash))
            }
        }
    }

    async fn transaction_status(
        &self,
        provider: &dyn Eip1193Provider,
        tx_hash: &str,
    ) -> Result<TxStatus, ContractError> {
        Self::receipt_status(provider, tx_hash).await
    }

    async fn read_total_certificates(&self) -> Result<String, ContractError> {
        let data = abi::encode_call(abi::GET_TOTAL_CERTIFICATES, &[]);
        let call = json!([
            { "to": self.contract.to_string(), "data": abi::to_hex_data(&data) },
            "latest"
        ]);
        let raw = self.reader.request("eth_call", call).await?;
        let hex = raw
            .as_str()
            .ok_or_else(|| ContractError::Decode(format!("eth_call result: {}", raw)))?;
        abi::decode_uint256_decimal(&abi::from_hex_data(hex)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnchain_api::mock::MockProvider;
    use learnchain_types::chain::Wei;

    const CONTRACT: &str = "0x3859681C32ce57c9de5fe96Cf8e197E4b8c61f99";
    const ORG: &str = "0x6087050c4069ab730d872e625E035A8fd8DeD600";

    fn payment() -> CoursePayment {
        CoursePayment {
            course_id: "c1".into(),
            student_id: "u1".into(),
            student_name: "Ana".into(),
            organization: ORG.parse().unwrap(),
            organization_name: "Org".into(),
            value: Wei(1_000_000_000),
        }
    }

    fn bridge(reader: Arc<dyn Eip1193Provider>) -> EvmContractBridge {
        EvmContractBridge::new(CONTRACT.parse().unwrap(), reader)
            .with_poll_interval(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn confirmed_payment_sends_value_and_calldata() {
        let wallet = MockProvider::new()
            .respond("eth_accounts", Ok(json!(["0x00000000000000000000000000000000000000aa"])))
            .respond("eth_sendTransaction", Ok(json!("0xabc")))
            .respond("eth_getTransactionReceipt", Ok(json!({ "status": "0x1" })));
        let bridge = bridge(Arc::new(MockProvider::new()));

        let receipt = bridge.pay_for_course(&wallet, &payment()).await;
        assert!(receipt.success, "{}", receipt.message);
        assert_eq!(receipt.tx_hash.as_deref(), Some("0xabc"));

        let sent = wallet.requests_for("eth_sendTransaction");
        assert_eq!(sent.len(), 1);
        let tx = &sent[0][0];
        assert_eq!(tx["value"], "0x3b9aca00");
        assert_eq!(tx["to"], CONTRACT.to_lowercase());
        assert!(tx["data"].as_str().unwrap().starts_with("0x98bfc942"));
    }

    #[tokio::test]
    async fn reverted_receipt_is_a_failed_payment_with_hash() {
        let wallet = MockProvider::new()
            .respond("eth_accounts", Ok(json!(["0x00000000000000000000000000000000000000aa"])))
            .respond("eth_sendTransaction", Ok(json!("0xdead")))
            .respond("eth_getTransactionReceipt", Ok(json!({ "status": "0x0" })));
        let receipt = bridge(Arc::new(MockProvider::new()))
            .pay_for_course(&wallet, &payment())
            .await;
        assert!(!receipt.success);
        assert!(!receipt.unconfirmed);
        assert_eq!(receipt.tx_hash.as_deref(), Some("0xdead"));
        assert!(receipt.message.contains("reverted"));
    }

    #[tokio::test]
    async fn empty_account_list_fails_before_sending() {
        let wallet = MockProvider::new().respond("eth_accounts", Ok(json!([])));
        let receipt = bridge(Arc::new(MockProvider::new()))
            .pay_for_course(&wallet, &payment())
            .await;
        assert!(!receipt.success);
        assert!(receipt.tx_hash.is_none());
        assert!(wallet.requests_for("eth_sendTransaction").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn pending_receipt_times_out() {
        let wallet = MockProvider::new()
            .respond("eth_accounts", Ok(json!(["0x00000000000000000000000000000000000000aa"])))
            .respond("eth_sendTransaction", Ok(json!("0xslow")))
            .respond("eth_getTransactionReceipt", Ok(Value::Null));
        let receipt = bridge(Arc::new(MockProvider::new()))
            .with_timeout(Some(Duration::from_secs(1)))
            .pay_for_course(&wallet, &payment())
            .await;
        assert!(!receipt.success);
        assert!(receipt.unconfirmed);
        assert_eq!(receipt.tx_hash.as_deref(), Some("0xslow"));
        assert!(receipt.message.contains("Timed out"));
    }

    #[tokio::test]
    async fn status_lookup_reads_one_receipt() {
        let bridge = bridge(Arc::new(MockProvider::new()));
        let pending = MockProvider::new().respond("eth_getTransactionReceipt", Ok(Value::Null));
        let mined = MockProvider::new()
            .respond("eth_getTransactionReceipt", Ok(json!({ "status": "0x1" })));
        let failed = MockProvider::new()
            .respond("eth_getTransactionReceipt", Ok(json!({ "status": "0x0" })));

        assert_eq!(bridge.transaction_status(&pending, "0x1").await.unwrap(), TxStatus::Pending);
        assert_eq!(bridge.transaction_status(&mined, "0x1").await.unwrap(), TxStatus::Confirmed);
        assert_eq!(bridge.transaction_status(&failed, "0x1").await.unwrap(), TxStatus::Reverted);
        assert_eq!(pending.requests_for("eth_getTransactionReceipt"), vec![json!(["0x1"])]);
    }

    #[tokio::test]
    async fn reads_certificate_total_through_eth_call() {
        let word = format!("0x{:064x}", 12);
        let reader = Arc::new(MockProvider::new().respond("eth_call", Ok(json!(word))));
        let bridge = bridge(reader.clone());

        assert_eq!(bridge.read_total_certificates().await.unwrap(), "12");
        let calls = reader.requests_for("eth_call");
        assert_eq!(calls[0][0]["data"], "0x7843bb79");
        assert_eq!(calls[0][1], "latest");
    }
}
