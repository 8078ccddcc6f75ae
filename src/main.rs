//! Transaction history - command line entry point
//!
//! Bootstraps the history store and prints recorded transfers. With an owner
//! address and chain id it prints that owner's history on the chain; without
//! arguments it prints every record grouped by chain.
use anyhow::{bail, Context};
use dotenv::dotenv;
use log::info;
use std::collections::BTreeMap;
use std::env;
use wallet_tx_history::{AppConfig, ServiceContainer};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting transaction history v{}", wallet_tx_history::VERSION);

    let config = AppConfig::from_env();
    info!("Using history file {}", config.history_file.display());

    let services = ServiceContainer::init(config)
        .await
        .context("Failed to initialize transaction history")?;
    let transactions = services.transaction_interactor();
    let view = services.history_view();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [address, chain_id] => {
            let chain_id: u64 = chain_id
                .parse()
                .with_context(|| format!("Invalid chain id: {}", chain_id))?;
            let records = transactions.fetch_history(address, chain_id).await;
            print!("{}", view.render(chain_id, &records));
        }
        [] => {
            let mut by_chain = BTreeMap::new();
            for record in transactions.fetch_all().await {
                by_chain
                    .entry(record.chain_id)
                    .or_insert_with(Vec::new)
                    .push(record);
            }
            if by_chain.is_empty() {
                println!("No transactions recorded.");
            }
            for (chain_id, records) in by_chain {
                print!("{}", view.render(chain_id, &records));
            }
        }
        _ => bail!("Usage: tx-history [<address> <chain_id>]"),
    }

    Ok(())
}
