//! Configuration management for the tokenlist builder

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Main configuration struct for the tokenlist builder
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Base URL for the CoinGecko API
  pub coingecko_base_url: String,

  /// Optional CoinGecko API key (demo or pro)
  pub coingecko_api_key: Option<String>,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Pause between CoinGecko market batches in milliseconds
  pub markets_batch_delay_ms: u64,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let coingecko_base_url =
      env::var("TL_COINGECKO_BASE_URL").unwrap_or_else(|_| crate::COINGECKO_BASE_URL.to_string());

    let coingecko_api_key = env::var("TL_COINGECKO_API_KEY").ok();

    let timeout_secs = env::var("TL_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid TL_TIMEOUT_SECS".to_string()))?;

    let markets_batch_delay_ms = env::var("TL_MARKETS_BATCH_DELAY_MS")
      .unwrap_or_else(|_| crate::MARKETS_BATCH_DELAY_MS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid TL_MARKETS_BATCH_DELAY_MS".to_string()))?;

    Ok(Config { coingecko_base_url, coingecko_api_key, timeout_secs, markets_batch_delay_ms })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_base(coingecko_base_url: String) -> Self {
    Config {
      coingecko_base_url,
      coingecko_api_key: None,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      markets_batch_delay_ms: crate::MARKETS_BATCH_DELAY_MS,
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::default_with_base(crate::COINGECKO_BASE_URL.to_string())
  }
}
