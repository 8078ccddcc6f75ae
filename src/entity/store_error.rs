use super::TxStatus;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store document {0} is not a list of transaction records")]
    Corrupt(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransitionError {
    #[error("Transaction {tx_hash} is already {status}")]
    AlreadyFinal { tx_hash: String, status: TxStatus },

    #[error("Invalid transaction outcome: {0}")]
    InvalidOutcome(String),
}
