use crate::entity::ChainTransfer;
use anyhow::Result;
use async_trait::async_trait;

/// Submits transfers and reports their confirmation.
///
/// Signing and RPC live behind this seam; the history store only needs the
/// hash returned on submission and the eventual outcome.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Broadcast the transfer and return its transaction hash
    async fn send_transfer(&self, transfer: &ChainTransfer) -> Result<String>;

    /// Wait for the receipt; `true` when the transaction succeeded on chain
    async fn wait_for_confirmation(&self, chain_id: u64, tx_hash: &str) -> Result<bool>;
}
