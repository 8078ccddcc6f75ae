use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::TxStatus;

/// A persisted transfer, as stored in the history document.
///
/// Field order is the serialized key order; it matches documents written by the web app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: u64,
    pub chain_id: u64,
    pub tx_hash: String,
    pub address: String,
    #[serde(default)]
    pub recipient_address: String,
    /// Amount in the asset's smallest unit, kept as a base-10 string
    pub value: String,
    pub decimals: u32,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub action: String,
    /// ISO-8601 creation time, kept verbatim as written by the submitter
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: TxStatus,
    /// Fields written by other versions of the app, carried through rewrites untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionRecord {
    pub fn from_new(id: u64, new: NewTransaction) -> Self {
        Self {
            id,
            chain_id: new.chain_id,
            tx_hash: new.tx_hash,
            action: new.action,
            value: new.value,
            decimals: new.decimals,
            symbol: new.symbol,
            address: new.address,
            recipient_address: new.recipient_address,
            date: new.date,
            status: new.status,
            extra: Map::new(),
        }
    }
}

/// Fields supplied by the submitter; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub chain_id: u64,
    pub tx_hash: String,
    pub action: String,
    pub value: String,
    pub decimals: u32,
    pub symbol: String,
    pub address: String,
    pub recipient_address: String,
    pub date: String,
    pub status: TxStatus,
}

/// Shallow merge applied by `update`: set fields overwrite, unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub chain_id: Option<u64>,
    pub tx_hash: Option<String>,
    pub action: Option<String>,
    pub value: Option<String>,
    pub decimals: Option<u32>,
    pub symbol: Option<String>,
    pub address: Option<String>,
    pub recipient_address: Option<String>,
    pub date: Option<String>,
    pub status: Option<TxStatus>,
}

impl RecordPatch {
    pub fn status(status: TxStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, record: &mut TransactionRecord) {
        if let Some(chain_id) = self.chain_id {
            record.chain_id = chain_id;
        }
        if let Some(tx_hash) = self.tx_hash {
            record.tx_hash = tx_hash;
        }
        if let Some(action) = self.action {
            record.action = action;
        }
        if let Some(value) = self.value {
            record.value = value;
        }
        if let Some(decimals) = self.decimals {
            record.decimals = decimals;
        }
        if let Some(symbol) = self.symbol {
            record.symbol = symbol;
        }
        if let Some(address) = self.address {
            record.address = address;
        }
        if let Some(recipient_address) = self.recipient_address {
            record.recipient_address = recipient_address;
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionRecord {
        TransactionRecord::from_new(
            7,
            NewTransaction {
                chain_id: 1,
                tx_hash: "0xabc".to_string(),
                action: "send".to_string(),
                value: "5".to_string(),
                decimals: 18,
                symbol: "ETH".to_string(),
                address: "0xAA".to_string(),
                recipient_address: "0xBB".to_string(),
                date: "2024-01-01T00:00:00Z".to_string(),
                status: TxStatus::Pending,
            },
        )
    }

    #[test]
    fn patch_overwrites_only_set_fields() {
        let mut record = sample();
        let patch = RecordPatch {
            symbol: Some("WETH".to_string()),
            status: Some(TxStatus::Success),
            ..Default::default()
        };
        patch.apply(&mut record);

        assert_eq!(record.symbol, "WETH");
        assert_eq!(record.status, TxStatus::Success);
        assert_eq!(record.tx_hash, "0xabc");
        assert_eq!(record.value, "5");
        assert!(RecordPatch::default().is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["chainId"], 1);
        assert_eq!(json["txHash"], "0xabc");
        assert_eq!(json["recipientAddress"], "0xBB");
        assert_eq!(json["date"], "2024-01-01T00:00:00Z");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = r#"{
            "id": 3, "chainId": 1, "txHash": "0x1", "action": "send",
            "value": "1", "decimals": 18, "symbol": "ETH", "address": "0xAA",
            "recipientAddress": "0xBB", "date": "2024-01-01T00:00:00Z",
            "status": "error", "note": "from a newer client"
        }"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.status, TxStatus::Error);
        assert_eq!(record.extra["note"], "from a newer client");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["note"], "from a newer client");
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{
            "id": 3, "chainId": 1, "txHash": "0x1", "value": "1",
            "decimals": 18, "address": "0xAA", "date": "2024-01-01T00:00:00Z"
        }"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.status, TxStatus::Pending);
        assert!(record.action.is_empty());
        assert!(record.recipient_address.is_empty());
    }

    #[test]
    fn dates_are_kept_verbatim() {
        let raw = r#"{
            "id": 1, "chainId": 1, "txHash": "0x1", "value": "1", "decimals": 18,
            "address": "0xAA", "date": "2024-05-01T12:34:56.000Z"
        }"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.date, "2024-05-01T12:34:56.000Z");
        assert_eq!(
            serde_json::to_value(&record).unwrap()["date"],
            "2024-05-01T12:34:56.000Z"
        );

        let loose: TransactionRecord =
            serde_json::from_str(&raw.replace("2024-05-01T12:34:56.000Z", "2024-05-01")).unwrap();
        assert_eq!(loose.date, "2024-05-01");
    }
}
