// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Learnchain CLI
//!
//! Browse the catalog, enroll through the payment contract, take lessons and quizzes
//! from a terminal. One-shot subcommands cover the read-only paths; `shell` keeps a
//! session open for everything that needs a login.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::config::ConfigCmdArgs;
use learnchain_app::AppContext;
use learnchain_client::{EvmContractBridge, FileStorage, HttpBackend, HttpRpcProvider, RpcWalletConnector};
use learnchain_telemetry::{init_tracing, LogFormat};
use learnchain_types::config::ClientConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[clap(
    name = "learnchain",
    version,
    about = "Terminal client for the learnchain learning platform."
)]
struct Cli {
    /// Path of the client configuration file. Defaults apply when it does not exist.
    #[clap(long, global = true, env = "LEARNCHAIN_CONFIG", default_value = "learnchain.toml")]
    config: PathBuf,

    /// Log output format: `pretty` or `json`.
    #[clap(long, global = true, env = "LEARNCHAIN_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the first courses and bundles of the catalog.
    Courses {
        #[clap(long, default_value = "6")]
        limit: usize,
    },

    /// Show one course with its lessons.
    Course { id: String },

    /// Search courses and bundles.
    Search {
        query: String,
        /// Only show results of this organization.
        #[clap(long)]
        organization: Option<String>,
    },

    /// Read the certificate counter of the payment contract.
    CertificatesTotal,

    /// Generate or inspect the configuration file.
    Config(ConfigCmdArgs),

    /// Interactive session: login, enroll, learn, take quizzes.
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format).context("failed to initialize logging")?;

    match cli.command {
        Commands::Config(args) => commands::config::run(args, &cli.config),
        command => run(command, &cli.config).await,
    }
}

async fn run(command: Commands, config_path: &Path) -> Result<()> {
    let ctx = build_context(load_config(config_path)?)?;
    match command {
        Commands::Courses { limit } => commands::catalog::run_courses(&ctx, limit).await,
        Commands::Course { id } => commands::catalog::run_course(&ctx, &id).await,
        Commands::Search {
            query,
            organization,
        } => commands::catalog::run_search(&ctx, &query, organization.as_deref()).await,
        Commands::CertificatesTotal => commands::catalog::run_certificates_total(&ctx).await,
        Commands::Shell => commands::shell::run(ctx).await,
        Commands::Config(_) => Ok(()),
    }
}

fn load_config(path: &Path) -> Result<ClientConfig> {
    let config = ClientConfig::load_or_default(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    tracing::debug!(target: "cli", api = %config.api_base_url, rpc = %config.chain.rpc_url, "config loaded");
    Ok(config)
}

/// Wires the production adapters into an [`AppContext`].
fn build_context(config: ClientConfig) -> Result<AppContext> {
    let backend = Arc::new(HttpBackend::from_config(&config)?);
    let provider = Arc::new(HttpRpcProvider::new(
        &config.chain.rpc_url,
        config.request_timeout(),
    )?);
    let contract = Arc::new(EvmContractBridge::from_config(&config, provider.clone())?);
    let wallet = Arc::new(RpcWalletConnector::new(provider));
    let storage = Arc::new(FileStorage::new(config.storage.path.clone()));
    Ok(AppContext::new(config, backend, contract, wallet, storage))
}
