//! # tl-models
//!
//! Data model for the tokenlist builder.
//!
//! This crate defines:
//! - The canonical [`FungibleToken`] record assembled by the pipeline
//! - Chain configuration types ([`Chain`], [`TokenSource`], [`ChainImpl`])
//! - Wire shapes for the CoinGecko catalog and market endpoints
//! - JSON-RPC request/response envelopes for on-chain verification

pub mod chain;
pub mod coingecko;
pub mod rpc;
pub mod token;

pub use chain::{Chain, ChainImpl, CoinGeckoRef, RpcUrl, TokenSource};
pub use coingecko::{CatalogCoin, MarketCoin};
pub use rpc::{RpcRequest, RpcResponse};
pub use token::FungibleToken;
