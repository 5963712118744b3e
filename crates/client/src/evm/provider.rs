// Path: crates/client/src/evm/provider.rs

use async_trait::async_trait;
use learnchain_api::Eip1193Provider;
use learnchain_types::error::WalletError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use url::Url;

/// EIP-1193 code for "the user rejected the request".
pub const USER_REJECTED: i64 = 4001;
/// JSON-RPC code for an unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: i64,
    pub method: &'a str,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn into_result(self) -> Result<Value, WalletError> {
        if let Some(err) = self.error {
            return Err(if err.code == USER_REJECTED {
                WalletError::Rejected(err.message)
            } else {
                WalletError::Provider {
                    code: err.code,
                    message: err.message,
                }
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// An [`Eip1193Provider`] that forwards every request to a JSON-RPC node over HTTP.
///
/// Against a public endpoint only reads succeed. A development node with unlocked
/// accounts also serves `eth_accounts` and `eth_sendTransaction`, which makes it usable
/// as the signing wallet.
#[derive(Debug)]
pub struct HttpRpcProvider {
    client: Client,
    url: Url,
    next_id: AtomicI64,
}

impl HttpRpcProvider {
    pub fn new(rpc_url: &str, timeout: Option<Duration>) -> Result<Self, WalletError> {
        let url = Url::parse(rpc_url)
            .map_err(|e| WalletError::Transport(format!("rpc url {}: {}", rpc_url, e)))?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WalletError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url,
            next_id: AtomicI64::new(1),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Eip1193Provider for HttpRpcProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        tracing::trace!(target: "evm", id, method, "json-rpc request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::Transport(format!(
                "{} answered HTTP {}",
                self.url, status
            )));
        }
        let parsed: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Transport(format!("invalid JSON-RPC response: {}", e)))?;
        parsed.into_result()
    }
}
