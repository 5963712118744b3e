// Path: crates/types/src/config/mod.rs

//! Client configuration (`learnchain.toml`).
use crate::chain::Address;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const ENV_API_BASE_URL: &str = "LEARNCHAIN_API_BASE_URL";
/// Environment variable overriding [`ChainConfig::rpc_url`].
pub const ENV_RPC_URL: &str = "LEARNCHAIN_RPC_URL";

/// Top-level client configuration. Every field has a default so an empty file is valid.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API, e.g. `http://localhost:5000/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Optional per-request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// The payment contract and the node used to reach it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint used for read-only contract calls and as the default wallet provider.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Address of the deployed course-payment contract.
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
}

/// Payment flow parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentConfig {
    /// Recipient used when a course's organization has no wallet address.
    #[serde(default = "default_recipient")]
    pub default_recipient: String,
    /// Interval between transaction receipt polls.
    #[serde(default = "default_confirmation_poll_ms")]
    pub confirmation_poll_ms: u64,
    /// Gives up waiting for a receipt after this long. Waits indefinitely when unset.
    #[serde(default)]
    pub confirmation_timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Number of courses and of bundles kept from each response.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Courses/bundles fetched per "show more" step on the home screen.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Certificates revealed per "show more" step on the profile screen.
    #[serde(default = "default_certificates_page")]
    pub certificates_page: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding the auth token and pending enrollments.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}
fn default_rpc_url() -> String {
    "https://ethereum-sepolia-rpc.publicnode.com".to_string()
}
fn default_contract_address() -> String {
    "0x3859681C32ce57c9de5fe96Cf8e197E4b8c61f99".to_string()
}
fn default_recipient() -> String {
    "0x6087050c4069ab730d872e625E035A8fd8DeD600".to_string()
}
fn default_confirmation_poll_ms() -> u64 {
    2_000
}
fn default_debounce_ms() -> u64 {
    500
}
fn default_top_n() -> usize {
    5
}
fn default_page_size() -> usize {
    6
}
fn default_certificates_page() -> usize {
    4
}
fn default_storage_path() -> PathBuf {
    PathBuf::from("learnchain-storage.json")
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            default_recipient: default_recipient(),
            confirmation_poll_ms: default_confirmation_poll_ms(),
            confirmation_timeout_secs: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            top_n: default_top_n(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            certificates_page: default_certificates_page(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
            chain: ChainConfig::default(),
            payment: PaymentConfig::default(),
            search: SearchConfig::default(),
            catalog: CatalogConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Reads a TOML file, applies environment overrides and validates the result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: ClientConfig = toml::from_str(&raw)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Like [`ClientConfig::load`], but falls back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(url) = std::env::var(ENV_RPC_URL) {
            if !url.trim().is_empty() {
                self.chain.rpc_url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api_base_url).map_err(|e| ConfigError::Invalid {
            field: "api_base_url",
            reason: e.to_string(),
        })?;
        url::Url::parse(&self.chain.rpc_url).map_err(|e| ConfigError::Invalid {
            field: "chain.rpc_url",
            reason: e.to_string(),
        })?;
        self.contract_address()?;
        self.default_recipient()?;
        if self.search.top_n == 0 {
            return Err(ConfigError::Invalid {
                field: "search.top_n",
                reason: "must be at least 1".into(),
            });
        }
        if self.catalog.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "catalog.page_size",
                reason: "must be at least 1".into(),
            });
        }
        if self.payment.confirmation_poll_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "payment.confirmation_poll_ms",
                reason: "must be non-zero".into(),
            });
        }
        Ok(())
    }

    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        self.chain
            .contract_address
            .parse()
            .map_err(|e: crate::error::ContractError| ConfigError::Invalid {
                field: "chain.contract_address",
                reason: e.to_string(),
            })
    }

    pub fn default_recipient(&self) -> Result<Address, ConfigError> {
        self.payment
            .default_recipient
            .parse()
            .map_err(|e: crate::error::ContractError| ConfigError::Invalid {
                field: "payment.default_recipient",
                reason: e.to_string(),
            })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn confirmation_poll_interval(&self) -> Duration {
        Duration::from_millis(self.payment.confirmation_poll_ms)
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.payment.confirmation_timeout_secs.map(Duration::from_secs)
    }
}
