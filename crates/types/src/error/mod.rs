// Path: crates/types/src/error/mod.rs
//! Error taxonomy for the learnchain client.
//!
//! Each external boundary has its own enum. [`FlowError`] is the umbrella that view-model
//! actions propagate with `?` before turning it into a user-facing notice.

use thiserror::Error;

/// Errors from the backend REST API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The backend's `message` field, or the raw body.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("Failed to decode backend response: {0}")]
    Decode(String),
    /// A write was attempted without a stored bearer token.
    #[error("No auth token stored")]
    MissingToken,
    /// The request could not be built (bad base URL, bad multipart part).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// The message a screen should show for this failure, preferring the backend's own.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Errors from the wallet connection or its EIP-1193 provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Wallet is not connected")]
    NotConnected,
    #[error("Request rejected by wallet: {0}")]
    Rejected(String),
    #[error("Wallet exposes no accounts")]
    NoAccounts,
    #[error("Wallet provider error {code}: {message}")]
    Provider {
        /// JSON-RPC / EIP-1193 error code.
        code: i64,
        message: String,
    },
    #[error("Wallet transport error: {0}")]
    Transport(String),
}

/// Errors from the smart-contract bridge.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
    #[error("Transaction {0} reverted")]
    Reverted(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Failed to decode contract response: {0}")]
    Decode(String),
    #[error("Timed out waiting for receipt of {0}")]
    ConfirmationTimeout(String),
}

/// Errors from local persisted storage.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Client-side checks that run before any network or contract call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unanswered questions: {}", .0.join(", "))]
    UnansweredQuestions(Vec<String>),
    #[error("Question {question} has no option {option}")]
    UnknownOption {
        question: String,
        option: String,
    },
    #[error("Course has no final quiz")]
    MissingQuiz,
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Not enrolled in {0}")]
    NotEnrolled(String),
    #[error("Bundle certificate requirements not met")]
    CertificateNotEligible,
}

/// Errors loading or validating [`crate::config::ClientConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Umbrella error for view-model actions.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Not logged in")]
    NotAuthenticated,
}

impl FlowError {
    /// Wallet failures send the user to the connect screen.
    pub fn is_wallet(&self) -> bool {
        matches!(
            self,
            FlowError::Wallet(_) | FlowError::Contract(ContractError::Wallet(_))
        )
    }
}
