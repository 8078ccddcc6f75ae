mod record_filter;
mod store_error;
mod transaction;
mod transfer;
mod tx_status;

pub use record_filter::RecordFilter;
pub use store_error::{StoreError, TransitionError};
pub use transaction::{NewTransaction, RecordPatch, TransactionRecord};
pub use transfer::{ChainTransfer, TransferRequest, TransferResult};
pub use tx_status::{TxOutcome, TxStatus};
