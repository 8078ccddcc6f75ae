use super::{TransactionRecord, TxStatus};

/// Field/value pair a record must strictly equal to be selected
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    Id(u64),
    ChainId(u64),
    TxHash(String),
    Action(String),
    Symbol(String),
    Address(String),
    RecipientAddress(String),
    Status(TxStatus),
}

impl RecordFilter {
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            RecordFilter::Id(id) => record.id == *id,
            RecordFilter::ChainId(chain_id) => record.chain_id == *chain_id,
            RecordFilter::TxHash(tx_hash) => record.tx_hash == *tx_hash,
            RecordFilter::Action(action) => record.action == *action,
            RecordFilter::Symbol(symbol) => record.symbol == *symbol,
            RecordFilter::Address(address) => record.address == *address,
            RecordFilter::RecipientAddress(address) => record.recipient_address == *address,
            RecordFilter::Status(status) => record.status == *status,
        }
    }
}

impl std::fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFilter::Id(id) => write!(f, "id={}", id),
            RecordFilter::ChainId(chain_id) => write!(f, "chainId={}", chain_id),
            RecordFilter::TxHash(tx_hash) => write!(f, "txHash={}", tx_hash),
            RecordFilter::Action(action) => write!(f, "action={}", action),
            RecordFilter::Symbol(symbol) => write!(f, "symbol={}", symbol),
            RecordFilter::Address(address) => write!(f, "address={}", address),
            RecordFilter::RecipientAddress(address) => write!(f, "recipientAddress={}", address),
            RecordFilter::Status(status) => write!(f, "status={}", status),
        }
    }
}
