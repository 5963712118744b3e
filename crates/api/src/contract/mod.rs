// Path: crates/api/src/contract/mod.rs

use crate::wallet::Eip1193Provider;
use async_trait::async_trait;
use learnchain_types::chain::{Address, TxHash, Wei};
use learnchain_types::error::ContractError;
use serde::{Deserialize, Serialize};

/// Arguments of the contract's `payForCourse`, plus the attached value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePayment {
    pub course_id: String,
    pub student_id: String,
    pub student_name: String,
    pub organization: Address,
    pub organization_name: String,
    pub value: Wei,
}

/// Outcome of a payment attempt. Bridges report failures here instead of erroring,
/// so callers can show `message` as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub success: bool,
    pub message: String,
    /// Present once the transaction was submitted, even if it later reverted.
    pub tx_hash: Option<TxHash>,
    /// Submitted, but no receipt was seen before the bridge stopped waiting. The payment
    /// may still confirm; check it with [`ContractBridge::transaction_status`].
    #[serde(default)]
    pub unconfirmed: bool,
}

impl PaymentReceipt {
    pub fn confirmed(tx_hash: TxHash) -> Self {
        Self {
            success: true,
            message: "Payment successful".to_string(),
            tx_hash: Some(tx_hash),
            unconfirmed: false,
        }
    }

    pub fn failed(error: &ContractError, tx_hash: Option<TxHash>) -> Self {
        let unconfirmed =
            tx_hash.is_some() && matches!(error, ContractError::ConfirmationTimeout(_));
        Self {
            success: false,
            message: error.to_string(),
            tx_hash,
            unconfirmed,
        }
    }
}

/// On-chain state of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// No receipt yet.
    Pending,
    Confirmed,
    Reverted,
}

/// The two functions of the fixed course-payment contract.
#[async_trait]
pub trait ContractBridge: Send + Sync {
    /// Submits `payForCourse` through the wallet provider and waits for confirmation.
    async fn pay_for_course(
        &self,
        provider: &dyn Eip1193Provider,
        payment: &CoursePayment,
    ) -> PaymentReceipt;

    /// Looks up the receipt of `tx_hash` once, without waiting.
    async fn transaction_status(
        &self,
        provider: &dyn Eip1193Provider,
        tx_hash: &str,
    ) -> Result<TxStatus, ContractError>;

    /// Reads `getTotalCertificates()` as a decimal string.
    async fn read_total_certificates(&self) -> Result<String, ContractError>;
}
