pub mod transaction_repository;

pub use transaction_repository::{
    JsonFileTransactionRepository, RecordGuard, TransactionRepository, UpdateOutcome,
};
