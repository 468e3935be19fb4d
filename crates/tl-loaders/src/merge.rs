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

//! Provenance-aware merging of token feeds.
//!
//! Two merge directions, both keyed by [`FungibleToken::merge_key`]:
//! - Static feeds are equally authoritative: the first feed to produce a
//!   key keeps its field values, later feeds only add their provenance
//!   label.
//! - Refinement lists (CoinGecko results) overwrite field values for an
//!   existing key while the provenance labels of both sides are unioned.
//!
//! Output preserves insertion order of first appearance, but callers must
//! not depend on ordering.

use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::json_path;
use tl_models::{FungibleToken, TokenSource};

/// Accumulator for one merge pass
#[derive(Debug, Default)]
pub struct TokenMerger {
  order: Vec<String>,
  map: HashMap<String, FungibleToken>,
}

impl TokenMerger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a token from a static feed. First feed wins on fields,
  /// later feeds only union their label into `source`.
  pub fn add_static(&mut self, label: &str, token: FungibleToken) {
    let key = token.merge_key();
    match self.map.get_mut(&key) {
      Some(existing) => existing.add_source(label),
      None => {
        let mut token = token;
        token.source = vec![label.to_string()];
        self.order.push(key.clone());
        self.map.insert(key, token);
      }
    }
  }

  /// Fold in a token from a refinement list. Incoming fields win; the
  /// provenance labels of both sides are unioned (existing labels first).
  pub fn add_refinement(&mut self, token: FungibleToken) {
    let key = token.merge_key();
    match self.map.remove(&key) {
      Some(existing) => {
        let mut merged = token;
        let mut source = existing.source;
        for label in merged.source.drain(..) {
          if !source.contains(&label) {
            source.push(label);
          }
        }
        merged.source = source;
        self.map.insert(key, merged);
      }
      None => {
        self.order.push(key.clone());
        self.map.insert(key, token);
      }
    }
  }

  pub fn len(&self) -> usize {
    self.map.len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  /// Consume the accumulator, yielding tokens in first-appearance order
  pub fn into_tokens(mut self) -> Vec<FungibleToken> {
    self.order.iter().filter_map(|key| self.map.remove(key)).collect()
  }
}

/// Merge static feeds and refinement lists into one deduplicated list.
///
/// Every feed failure is soft: a feed that cannot be fetched, is not
/// 2xx, does not parse, or holds no token array at its configured path
/// simply contributes nothing.
pub async fn merge_sources(
  client: &Client,
  static_sources: &[TokenSource],
  extra_lists: Vec<Vec<FungibleToken>>,
) -> Vec<FungibleToken> {
  let mut merger = TokenMerger::new();

  for feed in static_sources {
    match fetch_feed_tokens(client, feed).await {
      Some(tokens) => {
        debug!("Feed {} contributed {} tokens", feed.source, tokens.len());
        for token in tokens {
          merger.add_static(&feed.source, token);
        }
      }
      None => continue,
    }
  }

  for list in extra_lists {
    for token in list {
      merger.add_refinement(token);
    }
  }

  merger.into_tokens()
}

/// Fetch one static feed and extract its token array. `None` on any
/// failure.
async fn fetch_feed_tokens(client: &Client, feed: &TokenSource) -> Option<Vec<FungibleToken>> {
  let response = match client.get(&feed.url).send().await {
    Ok(r) => r,
    Err(e) => {
      warn!("Feed {} unreachable at {}: {}", feed.source, feed.url, e);
      return None;
    }
  };

  if !response.status().is_success() {
    warn!("Feed {} returned HTTP {} from {}", feed.source, response.status(), feed.url);
    return None;
  }

  let body: Value = match response.json().await {
    Ok(v) => v,
    Err(e) => {
      warn!("Feed {} body is not JSON: {}", feed.source, e);
      return None;
    }
  };

  let array = match feed.path.as_deref() {
    Some(path) => json_path::lookup(&body, path)?.clone(),
    None => body,
  };

  let tokens: Vec<FungibleToken> = match serde_json::from_value(array) {
    Ok(t) => t,
    Err(e) => {
      warn!("Feed {} token array does not match the expected shape: {}", feed.source, e);
      return None;
    }
  };

  if tokens.is_empty() {
    return None;
  }
  Some(tokens)
}
