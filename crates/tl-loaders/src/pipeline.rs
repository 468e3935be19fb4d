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

//! Per-chain orchestration and output assembly.
//!
//! Chains run strictly sequentially. Each chain's tokens flow through
//! CoinGecko enrichment, static-feed merging, local-list concatenation
//! and RPC verification, then accumulate into one list per
//! implementation family. The family accumulator dedups on the exact
//! address string only -- not case-folded and not chain-scoped. That
//! matches the shape downstream consumers already rely on, so it stays.

use reqwest::Client;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::coingecko::{CatalogCache, CoinGeckoClient};
use crate::error::LoaderResult;
use crate::{merge_sources, verify_tokens};
use tl_core::Config;
use tl_models::{Chain, FungibleToken};

/// One chain's configuration plus its locally maintained token list
#[derive(Debug, Clone)]
pub struct ChainBundle {
  pub chain: Chain,
  pub local_tokens: Vec<FungibleToken>,
}

/// Accumulated output: implementation family -> token list
pub type FamilyLists = BTreeMap<String, Vec<FungibleToken>>;

/// The end-to-end token-list builder
pub struct TokenListPipeline {
  http: Client,
  coingecko: CoinGeckoClient,
  catalog: CatalogCache,
}

impl TokenListPipeline {
  pub fn new(config: &Config) -> LoaderResult<Self> {
    let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    let coingecko = CoinGeckoClient::new(http.clone(), config);
    Ok(Self { http, coingecko, catalog: CatalogCache::new() })
  }

  /// Run every chain through the pipeline and accumulate per-family
  /// lists. Soft failures along the way cost data, never the run.
  pub async fn run(&self, bundles: Vec<ChainBundle>) -> FamilyLists {
    let mut families = FamilyLists::new();

    for bundle in bundles {
      let chain = &bundle.chain;
      info!("Processing chain {} ({})", chain.id, chain.implementation);

      let coingecko_tokens = self
        .coingecko
        .tokens_for_chain(&self.catalog, &chain.chain_id, chain.coingecko_platform())
        .await;
      info!("Chain {}: {} CoinGecko tokens", chain.id, coingecko_tokens.len());

      let mut candidates =
        merge_sources(&self.http, &chain.token_source, vec![coingecko_tokens]).await;
      candidates.extend(bundle.local_tokens);
      info!("Chain {}: {} candidate tokens before verification", chain.id, candidates.len());

      let verified = verify_tokens(&self.http, chain, candidates).await;

      let family = families.entry(chain.implementation.as_str().to_string()).or_default();
      let before = family.len();
      fold_into_family(family, verified);
      info!(
        "Chain {}: accumulated {} new tokens into family {}",
        chain.id,
        family.len() - before,
        chain.implementation
      );
    }

    families
  }
}

/// Append `incoming` to a family list, dropping tokens whose exact
/// address string is already present. First occurrence wins across the
/// whole family, including tokens from earlier chains.
pub fn fold_into_family(family: &mut Vec<FungibleToken>, incoming: Vec<FungibleToken>) {
  for token in incoming {
    if family.iter().any(|existing| existing.address == token.address) {
      continue;
    }
    family.push(token);
  }
}

/// Write one `<family>.json` file per accumulated list. IO failures
/// here are fatal; nothing is flushed incrementally before this point.
pub fn write_token_lists(out_dir: &Path, families: &FamilyLists) -> LoaderResult<()> {
  fs::create_dir_all(out_dir)?;

  for (family, tokens) in families {
    let path = out_dir.join(format!("{family}.json"));
    fs::write(&path, serde_json::to_vec(tokens)?)?;
    info!("Wrote {} tokens to {}", tokens.len(), path.display());
  }

  Ok(())
}
