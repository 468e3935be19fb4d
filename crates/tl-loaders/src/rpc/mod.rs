/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! On-chain verification dispatch.
//!
//! Selects the verifier matching a chain's implementation family.
//! Missing or invalid RPC URLs and unsupported families bypass
//! verification and pass the tokens through unchanged.

pub mod abi;
pub mod evm;
pub mod sol;

use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use tl_core::DEFAULT_RPC_PAGE_SIZE;
use tl_models::{Chain, ChainImpl, FungibleToken};

/// Some RPC nodes enforce small batch limits
const PAGE_SIZE_OVERRIDES: [(&str, usize); 2] = [("43114", 20), ("25", 3)];

/// Batch size for a chain's RPC requests
pub fn page_size_for_chain(chain_id: &str) -> usize {
  PAGE_SIZE_OVERRIDES
    .iter()
    .find(|(id, _)| *id == chain_id)
    .map(|(_, size)| *size)
    .unwrap_or(DEFAULT_RPC_PAGE_SIZE)
}

/// Verify `tokens` against the chain's primary RPC endpoint.
pub async fn verify_tokens(
  client: &Client,
  chain: &Chain,
  tokens: Vec<FungibleToken>,
) -> Vec<FungibleToken> {
  let Some(url) = chain.primary_rpc_url() else {
    info!("Chain {} has no RPC endpoint, skipping verification", chain.id);
    return tokens;
  };

  if Url::parse(url).is_err() {
    warn!("Chain {} has an invalid RPC endpoint {}, skipping verification", chain.id, url);
    return tokens;
  }

  match &chain.implementation {
    ChainImpl::Evm => {
      evm::verify(client, url, tokens, page_size_for_chain(&chain.chain_id)).await
    }
    ChainImpl::Sol => sol::verify(client, url, tokens, DEFAULT_RPC_PAGE_SIZE).await,
    ChainImpl::Other(family) => {
      info!("No verifier for impl {}, passing tokens through", family);
      tokens
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tl_models::RpcUrl;

  fn chain(implementation: ChainImpl, rpc: Option<&str>) -> Chain {
    Chain {
      id: "test".to_string(),
      name: "Test".to_string(),
      chain_id: "1".to_string(),
      implementation,
      rpc_urls: rpc.map(|u| vec![RpcUrl { url: u.to_string() }]).unwrap_or_default(),
      coingecko: None,
      token_source: vec![],
    }
  }

  fn token(address: &str) -> FungibleToken {
    FungibleToken {
      chain_id: "1".to_string(),
      address: address.to_string(),
      name: "T".to_string(),
      symbol: "T".to_string(),
      decimals: None,
      logo_uri: None,
      source: vec![],
    }
  }

  #[test]
  fn test_page_size_overrides() {
    assert_eq!(page_size_for_chain("43114"), 20);
    assert_eq!(page_size_for_chain("25"), 3);
    assert_eq!(page_size_for_chain("1"), DEFAULT_RPC_PAGE_SIZE);
  }

  #[tokio::test]
  async fn test_missing_rpc_url_passes_through() {
    let tokens = vec![token("0xaa")];
    let result = verify_tokens(&Client::new(), &chain(ChainImpl::Evm, None), tokens.clone()).await;
    assert_eq!(result, tokens);
  }

  #[tokio::test]
  async fn test_invalid_rpc_url_passes_through() {
    let tokens = vec![token("0xaa")];
    let result =
      verify_tokens(&Client::new(), &chain(ChainImpl::Evm, Some("not a url")), tokens.clone())
        .await;
    assert_eq!(result, tokens);
  }

  #[tokio::test]
  async fn test_unsupported_impl_passes_through() {
    let tokens = vec![token("cosmos1abc")];
    let chain = chain(ChainImpl::Other("cosmos".to_string()), Some("https://rpc.example"));
    let result = verify_tokens(&Client::new(), &chain, tokens.clone()).await;
    assert_eq!(result, tokens);
  }
}
