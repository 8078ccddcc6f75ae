use std::sync::Arc;

use crate::chain::ChainClient;
use crate::config::AppConfig;
use crate::interactor::{
    TransactionInteractor, TransactionInteractorImpl, TransferInteractor, TransferInteractorImpl,
};
use crate::storage::{JsonFileTransactionRepository, TransactionRepository};
use crate::view::{HistoryView, TextHistoryView};

/// ServiceContainer provides access to core application dependencies.
///
/// Built once at startup and shared with every handler.
pub struct ServiceContainer {
    repository: Arc<dyn TransactionRepository>,
    transaction_interactor: Arc<dyn TransactionInteractor>,
    history_view: Arc<dyn HistoryView>,
    config: AppConfig,
}

impl ServiceContainer {
    /// Open the history file named by `config` and bootstrap it if missing
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let repository = Arc::new(JsonFileTransactionRepository::new(
            config.history_file.clone(),
        )) as Arc<dyn TransactionRepository>;

        Self::with_repository(config, repository).await
    }

    /// Same as `init` with a caller-supplied store
    pub async fn with_repository(
        config: AppConfig,
        repository: Arc<dyn TransactionRepository>,
    ) -> anyhow::Result<Self> {
        repository.initialize().await?;

        let transaction_interactor = Arc::new(TransactionInteractorImpl::new(repository.clone()))
            as Arc<dyn TransactionInteractor>;

        Ok(Self {
            repository,
            transaction_interactor,
            history_view: Arc::new(TextHistoryView::new()),
            config,
        })
    }

    // Accessor methods

    pub fn repository(&self) -> Arc<dyn TransactionRepository> {
        self.repository.clone()
    }

    pub fn transaction_interactor(&self) -> Arc<dyn TransactionInteractor> {
        self.transaction_interactor.clone()
    }

    pub fn history_view(&self) -> Arc<dyn HistoryView> {
        self.history_view.clone()
    }

    pub fn config(&self) -> AppConfig {
        self.config.clone()
    }

    /// Transfer flow bound to the given chain client
    pub fn transfer_interactor(
        &self,
        chain_client: Arc<dyn ChainClient>,
    ) -> Arc<dyn TransferInteractor> {
        Arc::new(TransferInteractorImpl::new(
            chain_client,
            self.transaction_interactor.clone(),
            self.config.chain_request_timeout,
        ))
    }
}
