pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};

/// Base URL for the public CoinGecko API
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Maximum number of coin ids per /coins/markets request
pub const MARKETS_PAGE_SIZE: usize = 250;

/// Pause between /coins/markets requests in milliseconds.
/// The public CoinGecko tier throttles aggressively, so every batch waits.
pub const MARKETS_BATCH_DELAY_MS: u64 = 1000;

/// Default number of tokens per batched JSON-RPC request
pub const DEFAULT_RPC_PAGE_SIZE: usize = 100;

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
