use crate::entity::{NewTransaction, RecordFilter, RecordPatch, StoreError, TransactionRecord};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Predicate a located record must satisfy before a conditional update is applied
pub type RecordGuard = dyn Fn(&TransactionRecord) -> bool + Send + Sync;

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(TransactionRecord),
    NotFound,
    /// The guard refused the located record; carries it unchanged
    Rejected(TransactionRecord),
}

/// Durable storage for transaction records
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Create the backing document if it is missing. Safe to call repeatedly.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// All records, or those matching `filter`. Read failures yield an empty list.
    async fn list(&self, filter: Option<&RecordFilter>) -> Vec<TransactionRecord>;

    async fn get_by_id(&self, id: u64) -> Result<Option<TransactionRecord>, StoreError>;

    async fn create(&self, new: NewTransaction) -> Result<TransactionRecord, StoreError>;

    /// Atomically patch the first record matching `filter` if `guard` accepts it.
    async fn update_if(
        &self,
        filter: &RecordFilter,
        patch: RecordPatch,
        guard: &RecordGuard,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Patch the first record matching `filter`; `None` if nothing matched.
    async fn update(
        &self,
        filter: &RecordFilter,
        patch: RecordPatch,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        match self.update_if(filter, patch, &|_: &TransactionRecord| true).await? {
            UpdateOutcome::Updated(record) => Ok(Some(record)),
            UpdateOutcome::NotFound | UpdateOutcome::Rejected(_) => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: u64) -> Result<bool, StoreError>;
}

struct WriterState {
    // Highest id handed out by this process
    high_water_id: u64,
}

/// Stores the whole collection as one pretty-printed JSON array.
///
/// Every operation reloads the document first. Mutations hold a single writer
/// lock across reload, change and save, and saves go through a temp file plus
/// rename so readers never see a partial document.
pub struct JsonFileTransactionRepository {
    path: PathBuf,
    writer: Mutex<WriterState>,
}

impl JsonFileTransactionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(WriterState { high_water_id: 0 }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    async fn load_records(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let data = fs::read_to_string(&self.path).await?;
        let document: Value = serde_json::from_str(&data)?;
        if !document.is_array() {
            return Err(StoreError::Corrupt(self.path.display().to_string()));
        }

        Ok(serde_json::from_value(document)?)
    }

    async fn save_records(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(records)?;
        let tmp = self.temp_path();
        fs::write(&tmp, data).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for JsonFileTransactionRepository {
    async fn initialize(&self) -> Result<(), StoreError> {
        let mut writer = self.writer.lock().await;

        match fs::metadata(&self.path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).await?;
                    }
                }
                self.save_records(&[]).await?;
                info!("Created transaction history at {}", self.path.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        match self.load_records().await {
            Ok(records) => {
                let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
                writer.high_water_id = writer.high_water_id.max(max_id);
                info!(
                    "Loaded {} transaction records from {}",
                    records.len(),
                    self.path.display()
                );
            }
            // Left untouched; mutations will report the error
            Err(e) => warn!(
                "Transaction history at {} is unreadable: {}",
                self.path.display(),
                e
            ),
        }

        Ok(())
    }

    async fn list(&self, filter: Option<&RecordFilter>) -> Vec<TransactionRecord> {
        let records = match self.load_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Failed to read transaction history from {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match filter {
            Some(filter) => records.into_iter().filter(|r| filter.matches(r)).collect(),
            None => records,
        }
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<TransactionRecord>, StoreError> {
        let records = self.load_records().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    async fn create(&self, new: NewTransaction) -> Result<TransactionRecord, StoreError> {
        let mut writer = self.writer.lock().await;
        let mut records = self.load_records().await?;

        let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        let id = writer.high_water_id.max(max_id) + 1;

        let record = TransactionRecord::from_new(id, new);
        records.push(record.clone());
        self.save_records(&records).await?;
        writer.high_water_id = id;

        info!(
            "Recorded transaction {} with ID: {} (chain {}, status {})",
            record.tx_hash, record.id, record.chain_id, record.status
        );

        Ok(record)
    }

    async fn update_if(
        &self,
        filter: &RecordFilter,
        patch: RecordPatch,
        guard: &RecordGuard,
    ) -> Result<UpdateOutcome, StoreError> {
        let _writer = self.writer.lock().await;
        let mut records = self.load_records().await?;

        let Some(record) = records.iter_mut().find(|r| filter.matches(r)) else {
            debug!("No transaction record matches {}", filter);
            return Ok(UpdateOutcome::NotFound);
        };

        if !guard(record) {
            debug!("Update of transaction record {} rejected", record.id);
            return Ok(UpdateOutcome::Rejected(record.clone()));
        }

        patch.apply(record);
        let updated = record.clone();
        self.save_records(&records).await?;

        info!(
            "Updated transaction record: id={}, status={}",
            updated.id, updated.status
        );

        Ok(UpdateOutcome::Updated(updated))
    }

    async fn delete_by_id(&self, id: u64) -> Result<bool, StoreError> {
        let _writer = self.writer.lock().await;
        let mut records = self.load_records().await?;

        let initial_len = records.len();
        records.retain(|r| r.id != id);
        if records.len() == initial_len {
            return Ok(false);
        }

        self.save_records(&records).await?;
        info!("Deleted transaction record with ID: {}", id);

        Ok(true)
    }
}
