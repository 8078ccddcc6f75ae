use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HISTORY_FILE: &str = "data/list.json";
const DEFAULT_CHAIN_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Transaction history document, relative to the working directory
    pub history_file: PathBuf,

    /// Overall timeout for outbound chain-client calls
    pub chain_request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            chain_request_timeout: Duration::from_secs(DEFAULT_CHAIN_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        let timeout_secs = env::var("CHAIN_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CHAIN_REQUEST_TIMEOUT_SECS);

        Self {
            history_file: env::var("TX_HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_HISTORY_FILE)),
            chain_request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
