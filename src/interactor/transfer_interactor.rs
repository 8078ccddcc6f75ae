use crate::chain::ChainClient;
use crate::entity::{
    ChainTransfer, NewTransaction, TransferRequest, TransferResult, TxOutcome, TxStatus,
};
use crate::interactor::transaction_interactor::TransactionInteractor;
use crate::utils;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[async_trait]
pub trait TransferInteractor: Send + Sync {
    async fn validate_address(&self, address: &str) -> Result<bool>;
    async fn submit_transfer(&self, request: TransferRequest) -> Result<TransferResult>;
}

pub struct TransferInteractorImpl {
    chain_client: Arc<dyn ChainClient>,
    transactions: Arc<dyn TransactionInteractor>,
    request_timeout: Duration,
}

impl TransferInteractorImpl {
    pub fn new(
        chain_client: Arc<dyn ChainClient>,
        transactions: Arc<dyn TransactionInteractor>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            chain_client,
            transactions,
            request_timeout,
        }
    }

    // Recording never decides the fate of a transfer; failures are only logged
    async fn record_pending(&self, request: &TransferRequest, tx_hash: &str, value: &str) {
        let record = NewTransaction {
            chain_id: request.chain_id,
            tx_hash: tx_hash.to_string(),
            action: request.action.clone(),
            value: value.to_string(),
            decimals: request.decimals,
            symbol: request.symbol.clone(),
            address: request.from.clone(),
            recipient_address: request.to.clone(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: TxStatus::Pending,
        };

        if let Err(e) = self.transactions.record_submitted(Some(record)).await {
            error!("Failed to record submitted transaction {}: {}", tx_hash, e);
        }
    }

    async fn record_outcome(&self, tx_hash: &str, outcome: TxOutcome) {
        if let Err(e) = self.transactions.record_resolved(tx_hash, outcome).await {
            error!("Failed to record outcome of transaction {}: {}", tx_hash, e);
        }
    }
}

#[async_trait]
impl TransferInteractor for TransferInteractorImpl {
    async fn validate_address(&self, address: &str) -> Result<bool> {
        Ok(utils::validate_evm_address(address))
    }

    async fn submit_transfer(&self, request: TransferRequest) -> Result<TransferResult> {
        if !utils::validate_evm_address(&request.to) {
            return Ok(TransferResult::failed(
                &request,
                "Address must be 0x followed by 40 hex characters".to_string(),
            ));
        }

        let value = match utils::parse_units(&request.amount, request.decimals) {
            Ok(value) => value,
            Err(e) => return Ok(TransferResult::failed(&request, e.to_string())),
        };

        let transfer = ChainTransfer {
            chain_id: request.chain_id,
            from: request.from.clone(),
            to: request.to.clone(),
            value: value.clone(),
            decimals: request.decimals,
            symbol: request.symbol.clone(),
        };

        let tx_hash = match timeout(
            self.request_timeout,
            self.chain_client.send_transfer(&transfer),
        )
        .await
        {
            Ok(Ok(tx_hash)) => tx_hash,
            Ok(Err(e)) => {
                warn!("Transfer to {} was not submitted: {}", request.to, e);
                return Ok(TransferResult::failed(&request, e.to_string()));
            }
            Err(_) => {
                warn!("Transfer to {} timed out before submission", request.to);
                return Ok(TransferResult::failed(
                    &request,
                    "Request timed out".to_string(),
                ));
            }
        };

        info!(
            "Submitted transfer of {} {} to {} on chain {}: {}",
            request.amount, request.symbol, request.to, request.chain_id, tx_hash
        );
        self.record_pending(&request, &tx_hash, &value).await;

        let confirmation = timeout(
            self.request_timeout,
            self.chain_client
                .wait_for_confirmation(request.chain_id, &tx_hash),
        )
        .await;

        let status = match confirmation {
            Ok(Ok(confirmed)) => {
                let outcome = TxOutcome::from(confirmed);
                self.record_outcome(&tx_hash, outcome).await;
                TxStatus::from(outcome)
            }
            Ok(Err(e)) => {
                warn!("Could not confirm transaction {}: {}", tx_hash, e);
                TxStatus::Pending
            }
            Err(_) => {
                warn!("Confirmation of transaction {} timed out", tx_hash);
                TxStatus::Pending
            }
        };

        Ok(TransferResult {
            recipient: request.to.clone(),
            amount: request.amount.clone(),
            symbol: request.symbol.clone(),
            tx_hash: Some(tx_hash),
            status: Some(status),
            success: status != TxStatus::Error,
            error_message: match status {
                TxStatus::Error => Some("Transaction failed on chain".to_string()),
                _ => None,
            },
        })
    }
}
