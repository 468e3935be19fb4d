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

//! CoinGecko catalog and logo resolution.
//!
//! The full `/coins/list` catalog is fetched at most once per run through
//! an injectable [`CatalogCache`], then filtered per chain by platform
//! key. Logo URLs come from `/coins/markets`, batched and paced to stay
//! under the public-tier rate limit.

use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{LoaderError, LoaderResult};
use tl_core::{Config, MARKETS_PAGE_SIZE};
use tl_models::{CatalogCoin, FungibleToken, MarketCoin};

/// Provenance label recorded on every CoinGecko-derived token
pub const COINGECKO_SOURCE: &str = "coingecko";

/// Run-scoped, write-once cache of the full coin catalog.
///
/// Owned by the pipeline and passed by reference into every chain's
/// fetch, so tests get isolation with a fresh cache. A failed catalog
/// fetch is not cached; the next chain retries.
#[derive(Debug, Default)]
pub struct CatalogCache {
  cell: OnceCell<Vec<CatalogCoin>>,
}

impl CatalogCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Cache already holding a catalog, bypassing the network
  pub fn preloaded(coins: Vec<CatalogCoin>) -> Self {
    Self { cell: OnceCell::new_with(Some(coins)) }
  }
}

/// Client for the CoinGecko REST API
pub struct CoinGeckoClient {
  http: Client,
  base_url: String,
  api_key: Option<String>,
  batch_delay: Duration,
}

impl CoinGeckoClient {
  pub fn new(http: Client, config: &Config) -> Self {
    Self {
      http,
      base_url: config.coingecko_base_url.clone(),
      api_key: config.coingecko_api_key.clone(),
      batch_delay: Duration::from_millis(config.markets_batch_delay_ms),
    }
  }

  /// Full catalog, fetched once per cache. Any failure yields an empty
  /// slice and leaves the cache unset.
  pub async fn catalog<'a>(&self, cache: &'a CatalogCache) -> &'a [CatalogCoin] {
    match cache.cell.get_or_try_init(|| self.fetch_catalog()).await {
      Ok(coins) => coins.as_slice(),
      Err(e) => {
        warn!("CoinGecko catalog unavailable: {}", e);
        &[]
      }
    }
  }

  async fn fetch_catalog(&self) -> LoaderResult<Vec<CatalogCoin>> {
    let url = format!("{}/coins/list", self.base_url);
    info!("Fetching CoinGecko catalog from {}", url);

    let mut request = self.http.get(&url).query(&[("include_platform", "true")]);
    if let Some(key) = &self.api_key {
      request = request.query(&[("x_cg_demo_api_key", key.as_str())]);
    }
    let response = request.header("accept", "application/json").send().await?;

    if !response.status().is_success() {
      return Err(LoaderError::InvalidResponse {
        api_source: "coingecko".to_string(),
        message: format!("HTTP {}", response.status()),
      });
    }

    let coins: Vec<CatalogCoin> = response.json().await?;
    info!("Fetched {} coins from CoinGecko catalog", coins.len());
    Ok(coins)
  }

  /// Catalog coins deployed on the given platform, with their address
  pub async fn coins_for_platform(
    &self,
    cache: &CatalogCache,
    platform: &str,
  ) -> Vec<(CatalogCoin, String)> {
    self
      .catalog(cache)
      .await
      .iter()
      .filter_map(|coin| coin.address_on(platform).map(|addr| (coin.clone(), addr.to_string())))
      .collect()
  }

  /// Resolve logo URLs for the given coin ids via /coins/markets.
  ///
  /// Batched at 250 ids, strictly sequential with a pause after every
  /// batch. A failed batch contributes no logos; there is no retry.
  pub async fn logo_images(&self, ids: &[String]) -> HashMap<String, String> {
    let url = format!("{}/coins/markets", self.base_url);
    let mut images = HashMap::new();

    for batch in ids.chunks(MARKETS_PAGE_SIZE) {
      let joined = batch.join(",");
      let mut request =
        self.http.get(&url).query(&[("vs_currency", "usd"), ("ids", joined.as_str())]);
      if let Some(key) = &self.api_key {
        request = request.query(&[("x_cg_demo_api_key", key.as_str())]);
      }

      match request.send().await {
        Ok(response) if response.status().is_success() => {
          match response.json::<Vec<MarketCoin>>().await {
            Ok(coins) => {
              for coin in coins {
                if let Some(image) = coin.image {
                  images.insert(coin.id, image);
                }
              }
            }
            Err(e) => warn!("CoinGecko markets batch body unusable: {}", e),
          }
        }
        Ok(response) => {
          warn!("CoinGecko markets batch returned HTTP {}", response.status());
        }
        Err(e) => warn!("CoinGecko markets batch failed: {}", e),
      }

      tokio::time::sleep(self.batch_delay).await;
    }

    images
  }

  /// Produce one token per catalog coin deployed on `platform`, with
  /// logos resolved. `None` platform means the chain has no CoinGecko
  /// mapping and yields nothing.
  pub async fn tokens_for_chain(
    &self,
    cache: &CatalogCache,
    chain_id: &str,
    platform: Option<&str>,
  ) -> Vec<FungibleToken> {
    let Some(platform) = platform else {
      return Vec::new();
    };

    let coins = self.coins_for_platform(cache, platform).await;
    if coins.is_empty() {
      debug!("No CoinGecko coins found for platform {}", platform);
      return Vec::new();
    }

    let ids: Vec<String> = coins.iter().map(|(coin, _)| coin.id.clone()).collect();
    let images = self.logo_images(&ids).await;

    tokens_from_catalog(chain_id, coins, &images)
  }
}

/// Map platform coins and their resolved images onto token records
fn tokens_from_catalog(
  chain_id: &str,
  coins: Vec<(CatalogCoin, String)>,
  images: &HashMap<String, String>,
) -> Vec<FungibleToken> {
  coins
    .into_iter()
    .map(|(coin, address)| FungibleToken {
      chain_id: chain_id.to_string(),
      address,
      name: coin.name,
      symbol: coin.symbol,
      decimals: None,
      logo_uri: images.get(&coin.id).cloned(),
      source: vec![COINGECKO_SOURCE.to_string()],
    })
    .collect()
}
