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

use serde::{Deserialize, Serialize};

/// Execution model family of a chain.
///
/// Selects which RPC verifier applies and which output file a chain's
/// tokens are grouped into. Unrecognized values are preserved so their
/// chains still produce an output file, just without RPC verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChainImpl {
  Evm,
  Sol,
  Other(String),
}

impl ChainImpl {
  /// Stable name used for the per-family output file
  pub fn as_str(&self) -> &str {
    match self {
      ChainImpl::Evm => "evm",
      ChainImpl::Sol => "sol",
      ChainImpl::Other(s) => s.as_str(),
    }
  }
}

impl From<String> for ChainImpl {
  fn from(s: String) -> Self {
    match s.as_str() {
      "evm" => ChainImpl::Evm,
      "sol" => ChainImpl::Sol,
      _ => ChainImpl::Other(s),
    }
  }
}

impl From<ChainImpl> for String {
  fn from(value: ChainImpl) -> Self {
    value.as_str().to_string()
  }
}

impl std::fmt::Display for ChainImpl {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// One RPC endpoint entry from chain configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcUrl {
  pub url: String,
}

/// CoinGecko identifiers for a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinGeckoRef {
  /// Platform key used to resolve per-coin contract addresses
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub platform: Option<String>,

  /// Category id, parsed but not consumed by the pipeline yet
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub category_id: Option<String>,
}

/// Descriptor of one static token feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSource {
  /// Provenance label recorded on tokens from this feed
  pub source: String,

  /// URL returning a JSON body containing a token array
  pub url: String,

  /// Dot-path locating the token array inside the body; whole body if absent
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub path: Option<String>,
}

/// Configuration record for one blockchain target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
  pub id: String,

  #[serde(default)]
  pub name: String,

  #[serde(rename = "chainId")]
  pub chain_id: String,

  #[serde(rename = "impl")]
  pub implementation: ChainImpl,

  #[serde(rename = "rpcURLs", default)]
  pub rpc_urls: Vec<RpcUrl>,

  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub coingecko: Option<CoinGeckoRef>,

  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub token_source: Vec<TokenSource>,
}

impl Chain {
  /// First configured RPC endpoint, if any. Verification only ever uses
  /// the head of the list.
  pub fn primary_rpc_url(&self) -> Option<&str> {
    self.rpc_urls.first().map(|r| r.url.as_str())
  }

  /// CoinGecko platform key, if configured
  pub fn coingecko_platform(&self) -> Option<&str> {
    self.coingecko.as_ref().and_then(|c| c.platform.as_deref())
  }
}
