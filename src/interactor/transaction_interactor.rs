use crate::entity::{
    NewTransaction, RecordFilter, RecordPatch, TransactionRecord, TransitionError, TxOutcome,
    TxStatus,
};
use crate::storage::{TransactionRepository, UpdateOutcome};
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

/// Records submitted transfers and their confirmation, and serves the history view
#[async_trait]
pub trait TransactionInteractor: Send + Sync {
    /// Store a freshly submitted transfer as pending. `None` is ignored.
    async fn record_submitted(
        &self,
        record: Option<NewTransaction>,
    ) -> Result<Option<TransactionRecord>>;

    /// Move the record with `tx_hash` from pending to the final outcome.
    ///
    /// Returns `None` for an empty hash or an unknown one. Resolving an already
    /// final record to the same status is accepted; to a different one is an error.
    async fn record_resolved(
        &self,
        tx_hash: &str,
        outcome: TxOutcome,
    ) -> Result<Option<TransactionRecord>>;

    /// Records owned by `address` on `chain_id`
    async fn fetch_history(&self, address: &str, chain_id: u64) -> Vec<TransactionRecord>;

    /// Every record in the store
    async fn fetch_all(&self) -> Vec<TransactionRecord>;
}

pub struct TransactionInteractorImpl {
    repository: Arc<dyn TransactionRepository>,
}

impl TransactionInteractorImpl {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TransactionInteractor for TransactionInteractorImpl {
    async fn record_submitted(
        &self,
        record: Option<NewTransaction>,
    ) -> Result<Option<TransactionRecord>> {
        let Some(mut record) = record else {
            debug!("No transaction to record");
            return Ok(None);
        };

        if record.status != TxStatus::Pending {
            warn!(
                "Submitted transaction {} arrived as {}, recording it as pending",
                record.tx_hash, record.status
            );
            record.status = TxStatus::Pending;
        }

        let created = self.repository.create(record).await?;
        Ok(Some(created))
    }

    async fn record_resolved(
        &self,
        tx_hash: &str,
        outcome: TxOutcome,
    ) -> Result<Option<TransactionRecord>> {
        if tx_hash.trim().is_empty() {
            debug!("No transaction hash to resolve");
            return Ok(None);
        }

        let next = TxStatus::from(outcome);
        let filter = RecordFilter::TxHash(tx_hash.to_string());
        let guard = move |record: &TransactionRecord| record.status.can_transition_to(next);

        match self
            .repository
            .update_if(&filter, RecordPatch::status(next), &guard)
            .await?
        {
            UpdateOutcome::Updated(record) => {
                info!("Transaction {} resolved as {}", tx_hash, next);
                Ok(Some(record))
            }
            UpdateOutcome::NotFound => {
                warn!("No transaction record found for hash {}", tx_hash);
                Ok(None)
            }
            UpdateOutcome::Rejected(current) if current.status == next => {
                debug!("Transaction {} already {}", tx_hash, next);
                Ok(Some(current))
            }
            UpdateOutcome::Rejected(current) => Err(TransitionError::AlreadyFinal {
                tx_hash: tx_hash.to_string(),
                status: current.status,
            }
            .into()),
        }
    }

    async fn fetch_history(&self, address: &str, chain_id: u64) -> Vec<TransactionRecord> {
        self.repository
            .list(Some(&RecordFilter::Address(address.to_string())))
            .await
            .into_iter()
            .filter(|record| record.chain_id == chain_id)
            .collect()
    }

    async fn fetch_all(&self) -> Vec<TransactionRecord> {
        self.repository.list(None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileTransactionRepository;
    use tempfile::TempDir;

    fn new_tx(tx_hash: &str, address: &str, chain_id: u64) -> NewTransaction {
        NewTransaction {
            chain_id,
            tx_hash: tx_hash.to_string(),
            action: "send".to_string(),
            value: "1000000000000000000".to_string(),
            decimals: 18,
            symbol: "ETH".to_string(),
            address: address.to_string(),
            recipient_address: "0xBB".to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
            status: TxStatus::Pending,
        }
    }

    async fn interactor() -> (TempDir, TransactionInteractorImpl) {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileTransactionRepository::new(dir.path().join("list.json"));
        repo.initialize().await.unwrap();
        (dir, TransactionInteractorImpl::new(Arc::new(repo)))
    }

    #[tokio::test]
    async fn submitted_then_resolved_shows_in_history() {
        let (_dir, interactor) = interactor().await;
        let submitted = new_tx("0x1", "0xAA", 11155111);
        interactor
            .record_submitted(Some(submitted.clone()))
            .await
            .unwrap();

        interactor
            .record_resolved("0x1", TxOutcome::Success)
            .await
            .unwrap();

        let history = interactor.fetch_history("0xAA", 11155111).await;
        assert_eq!(history.len(), 1);

        let record = &history[0];
        assert_eq!(record.status, TxStatus::Success);
        assert_eq!(record.chain_id, submitted.chain_id);
        assert_eq!(record.tx_hash, submitted.tx_hash);
        assert_eq!(record.action, submitted.action);
        assert_eq!(record.value, submitted.value);
        assert_eq!(record.decimals, submitted.decimals);
        assert_eq!(record.symbol, submitted.symbol);
        assert_eq!(record.address, submitted.address);
        assert_eq!(record.recipient_address, submitted.recipient_address);
        assert_eq!(record.date, submitted.date);
    }

    #[tokio::test]
    async fn final_status_cannot_change() {
        let (_dir, interactor) = interactor().await;
        interactor
            .record_submitted(Some(new_tx("0x1", "0xAA", 1)))
            .await
            .unwrap();
        interactor
            .record_resolved("0x1", TxOutcome::Success)
            .await
            .unwrap();

        let err = interactor
            .record_resolved("0x1", TxOutcome::Error)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<TransitionError>(),
            Some(&TransitionError::AlreadyFinal {
                tx_hash: "0x1".to_string(),
                status: TxStatus::Success,
            })
        );

        let repeated = interactor
            .record_resolved("0x1", TxOutcome::Success)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(repeated.status, TxStatus::Success);

        let history = interactor.fetch_history("0xAA", 1).await;
        assert_eq!(history[0].status, TxStatus::Success);
    }

    #[tokio::test]
    async fn submissions_are_always_recorded_pending() {
        let (_dir, interactor) = interactor().await;
        let mut tx = new_tx("0x1", "0xAA", 1);
        tx.status = TxStatus::Success;

        let created = interactor.record_submitted(Some(tx)).await.unwrap().unwrap();
        assert_eq!(created.status, TxStatus::Pending);
    }

    #[tokio::test]
    async fn absent_inputs_are_no_ops() {
        let (_dir, interactor) = interactor().await;

        assert_eq!(interactor.record_submitted(None).await.unwrap(), None);
        assert_eq!(
            interactor
                .record_resolved("", TxOutcome::Success)
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            interactor
                .record_resolved("0xunknown", TxOutcome::Error)
                .await
                .unwrap(),
            None
        );
        assert!(interactor.fetch_all().await.is_empty());
    }

    #[tokio::test]
    async fn history_filters_by_owner_and_chain() {
        let (_dir, interactor) = interactor().await;
        for tx in [
            new_tx("0x1", "0xAA", 1),
            new_tx("0x2", "0xAA", 10),
            new_tx("0x3", "0xBB", 1),
        ] {
            interactor.record_submitted(Some(tx)).await.unwrap();
        }

        let history = interactor.fetch_history("0xAA", 1).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tx_hash, "0x1");

        assert!(interactor.fetch_history("0xCC", 1).await.is_empty());
        assert_eq!(interactor.fetch_all().await.len(), 3);
    }
}
