use crate::entity::TransactionRecord;
use crate::utils;
use chrono::{DateTime, Utc};

pub trait HistoryView: Send + Sync {
    fn render(&self, chain_id: u64, records: &[TransactionRecord]) -> String;
}

/// Plain-text transaction table
pub struct TextHistoryView;

impl TextHistoryView {
    pub fn new() -> Self {
        Self
    }

    fn format_amount(record: &TransactionRecord) -> String {
        let amount = utils::format_units(&record.value, record.decimals)
            .unwrap_or_else(|_| record.value.clone());
        format!("{} {}", amount, record.symbol)
    }

    // Unparseable dates are shown as stored
    fn format_date(date: &str) -> String {
        match DateTime::parse_from_rfc3339(date) {
            Ok(parsed) => parsed
                .with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            Err(_) => date.to_string(),
        }
    }

    fn format_row(record: &TransactionRecord) -> String {
        format!(
            "{:<13}  {:<8}  {:<24}  {:<13}  {}  {}",
            utils::shorten_address(&record.tx_hash),
            record.action,
            Self::format_amount(record),
            utils::shorten_address(&record.recipient_address),
            Self::format_date(&record.date),
            record.status
        )
    }
}

impl Default for TextHistoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryView for TextHistoryView {
    fn render(&self, chain_id: u64, records: &[TransactionRecord]) -> String {
        let mut text = format!("Transactions on chain {}\n", chain_id);

        if records.is_empty() {
            text.push_str("No transactions yet.\n");
            return text;
        }

        text.push_str(&format!(
            "{:<13}  {:<8}  {:<24}  {:<13}  {:<23}  {}\n",
            "Hash", "Action", "Amount", "Recipient", "Timestamp", "Status"
        ));
        for record in records {
            text.push_str(&Self::format_row(record));
            text.push('\n');
        }

        text
    }
}
