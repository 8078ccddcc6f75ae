use super::TxStatus;

/// Transfer as entered by the user, amount in human units (e.g. "0.5")
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub chain_id: u64,
    pub action: String,
    pub from: String,
    pub to: String,
    pub amount: String,
    pub decimals: u32,
    pub symbol: String,
}

/// Transfer handed to the chain client, value already in base units
#[derive(Debug, Clone, PartialEq)]
pub struct ChainTransfer {
    pub chain_id: u64,
    pub from: String,
    pub to: String,
    pub value: String,
    pub decimals: u32,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferResult {
    pub recipient: String,
    pub amount: String,
    pub symbol: String,
    pub tx_hash: Option<String>,
    /// Last known chain status; `None` when nothing reached the chain
    pub status: Option<TxStatus>,
    pub success: bool,
    pub error_message: Option<String>,
}

impl TransferResult {
    pub fn failed(request: &TransferRequest, error_message: String) -> Self {
        Self {
            recipient: request.to.clone(),
            amount: request.amount.clone(),
            symbol: request.symbol.clone(),
            tx_hash: None,
            status: None,
            success: false,
            error_message: Some(error_message),
        }
    }
}
