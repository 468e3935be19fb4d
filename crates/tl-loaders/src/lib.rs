//! # tl-loaders
//!
//! The token-list assembly pipeline.
//!
//! This crate provides the moving parts that turn heterogeneous token
//! feeds into one curated list per chain family:
//! - Static-feed fetching and provenance-aware merging
//! - CoinGecko catalog/logo resolution with a run-scoped catalog cache
//! - On-chain verification over batched JSON-RPC (EVM and Solana)
//! - The per-chain orchestration loop and output writer

pub mod coingecko;
pub mod error;
pub mod json_path;
pub mod merge;
pub mod pipeline;
pub mod rpc;

// Re-export commonly used types
pub use coingecko::{CatalogCache, CoinGeckoClient};
pub use error::{LoaderError, LoaderResult};
pub use merge::{merge_sources, TokenMerger};
pub use pipeline::{write_token_lists, ChainBundle, TokenListPipeline};
pub use rpc::verify_tokens;

// Prelude for convenient imports
pub mod prelude {
  pub use crate::{
    merge_sources, verify_tokens, write_token_lists, CatalogCache, ChainBundle, CoinGeckoClient,
    LoaderError, LoaderResult, TokenListPipeline,
  };
}
