//! eth-tx node watcher
//!
//! Connects to the configured node, reports its network and the first
//! account's balance, then logs connection changes until interrupted.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eth_tx::{types::format_ether, AppError, Config, ConnectionTracker, TransactionService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(rpc_url = %config.rpc_url, "Starting eth-tx");

    let tracker = ConnectionTracker::from_config(&config);
    let transactions = TransactionService::new(tracker.clone(), config.gas_policy());

    let accounts = tracker.connect(&config.rpc_url).await?;

    if let Some(required) = config.required_network.as_deref() {
        tracker.ensure_network(required).await?;
    }

    match accounts.first() {
        Some(account) => {
            let balance = transactions.get_balance(*account).await?;
            tracing::info!(account = %account, balance_eth = %format_ether(balance), "Web3 has been loaded");
        }
        None => tracing::warn!("{}", AppError::NoAccounts),
    }

    tracker.on_status_changed(|status| {
        if !status.connected {
            tracing::warn!("{}", AppError::NotConnected);
        } else if status.accounts.is_empty() {
            tracing::warn!("{}", AppError::NoAccounts);
        } else {
            let network = status.network.as_ref().map(|n| n.name.as_str()).unwrap_or("unknown");
            tracing::info!(
                network = %network,
                accounts = status.accounts.len(),
                "Connection status changed"
            );
        }
    })?;

    tokio::signal::ctrl_c().await?;

    tracker.stop_polling();
    tracing::info!("Shutting down");

    Ok(())
}
