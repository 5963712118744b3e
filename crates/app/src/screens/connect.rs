// Path: crates/app/src/screens/connect.rs

use crate::context::AppContext;
use crate::view::{Effect, Notice, ViewState};

pub const CONNECT_FAILED: &str = "Failed to connect wallet";
pub const DISCONNECT_FAILED: &str = "Failed to disconnect wallet";

/// Wallet connection and the contract's certificate counter.
#[derive(Debug, Default)]
pub struct ConnectScreen {
    /// `getTotalCertificates()` as a decimal string.
    pub total_certificates: ViewState<String>,
}

impl ConnectScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self, ctx: &AppContext) -> Option<String> {
        ctx.wallet.session().map(|s| s.address.to_string())
    }

    /// Connects and copies the address into the session store.
    pub async fn connect(&mut self, ctx: &mut AppContext) -> Effect {
        match ctx.wallet.connect().await {
            Ok(session) => {
                let address = session.address.to_string();
                tracing::info!(target: "screen::connect", %address, "wallet connected");
                ctx.session.set_wallet_address(Some(address));
                Effect::none()
            }
            Err(e) => {
                tracing::warn!(target: "screen::connect", error = %e, "wallet connect failed");
                Effect::notice(Notice::alert("Error", format!("{}: {}", CONNECT_FAILED, e)))
            }
        }
    }

    pub async fn disconnect(&mut self, ctx: &mut AppContext) -> Effect {
        match ctx.wallet.disconnect().await {
            Ok(()) => {
                ctx.session.set_wallet_address(None);
                Effect::none()
            }
            Err(e) => {
                tracing::warn!(target: "screen::connect", error = %e, "wallet disconnect failed");
                Effect::notice(Notice::alert("Error", DISCONNECT_FAILED))
            }
        }
    }

    pub async fn read_total_certificates(&mut self, ctx: &AppContext) {
        self.total_certificates = match ctx.contract.read_total_certificates().await {
            Ok(total) => ViewState::Loaded(total),
            Err(e) => {
                tracing::warn!(target: "screen::connect", error = %e, "certificate total unavailable");
                ViewState::Failed(e.to_string())
            }
        };
    }
}
