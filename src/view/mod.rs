pub mod history_view;

pub use history_view::{HistoryView, TextHistoryView};
