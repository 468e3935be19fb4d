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

//! Contract-call verification for EVM chains.
//!
//! Three read-only probes are issued per token batch: `decimals()`,
//! `symbol()` and `name()`. Verification is strictly additive -- a token
//! that cannot be enriched is still emitted, so an RPC outage never
//! shrinks the list. Transport failure for a batch re-inserts that
//! batch's tokens unmodified (fail-open); a non-2xx status or a
//! non-array body only skips the probe for that batch.

use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error};

use super::abi;
use tl_models::{FungibleToken, RpcRequest, RpcResponse};

/// The three fixed ERC-20 metadata probes: selector and target field
const PROBES: [(&str, Probe); 3] = [
  ("0x313ce567", Probe::Decimals),
  ("0x95d89b41", Probe::Symbol),
  ("0x06fdde03", Probe::Name),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
  Decimals,
  Symbol,
  Name,
}

impl Probe {
  /// Decode `raw` per this probe's return type and apply it to `token`.
  /// Un-decodable values leave the token untouched.
  fn apply(&self, token: &mut FungibleToken, raw: &str) {
    match self {
      Probe::Decimals => {
        if let Some(d) = abi::decode_uint8(raw) {
          token.decimals = Some(d);
        }
      }
      Probe::Symbol => {
        if let Some(s) = abi::decode_string(raw) {
          token.symbol = s;
        }
      }
      Probe::Name => {
        if let Some(n) = abi::decode_string(raw) {
          token.name = n;
        }
      }
    }
  }

  fn field_name(&self) -> &'static str {
    match self {
      Probe::Decimals => "decimals",
      Probe::Symbol => "symbol",
      Probe::Name => "name",
    }
  }
}

/// Accumulated verification state, keyed by address + chain id with
/// insertion order retained
#[derive(Debug, Default)]
struct VerifiedSet {
  order: Vec<String>,
  map: HashMap<String, FungibleToken>,
}

impl VerifiedSet {
  /// Apply one decoded probe value onto the accumulated record for the
  /// token, seeding from the unverified token on first sight
  fn enrich(&mut self, token: &FungibleToken, probe: Probe, raw: &str) {
    let key = token.rpc_key();
    let mut record = match self.map.remove(&key) {
      Some(existing) => existing,
      None => {
        self.order.push(key.clone());
        token.clone()
      }
    };
    probe.apply(&mut record, raw);
    self.map.insert(key, record);
  }

  /// Insert a token unmodified, replacing any accumulated enrichment
  /// for its key
  fn insert_unverified(&mut self, token: &FungibleToken) {
    let key = token.rpc_key();
    if !self.map.contains_key(&key) {
      self.order.push(key.clone());
    }
    self.map.insert(key, token.clone());
  }

  fn into_tokens(mut self) -> Vec<FungibleToken> {
    self.order.iter().filter_map(|key| self.map.remove(key)).collect()
  }
}

/// Verify a token list against an EVM RPC endpoint.
pub async fn verify(
  client: &Client,
  url: &str,
  tokens: Vec<FungibleToken>,
  page_size: usize,
) -> Vec<FungibleToken> {
  let chunks: Vec<&[FungibleToken]> = tokens.chunks(page_size.max(1)).collect();
  let mut verified = VerifiedSet::default();

  for (selector, probe) in PROBES {
    for chunk in &chunks {
      let body: Vec<RpcRequest> =
        chunk.iter().map(|t| RpcRequest::eth_call(&t.address, selector)).collect();

      let response = match client.post(url).json(&body).send().await {
        Ok(r) => r,
        Err(e) => {
          error!("RPC transport error from {} while probing {}: {}", url, probe.field_name(), e);
          for token in *chunk {
            verified.insert_unverified(token);
          }
          continue;
        }
      };

      if !response.status().is_success() {
        error!(
          "RPC {} returned HTTP {} while probing {}",
          url,
          response.status(),
          probe.field_name()
        );
        continue;
      }

      let body: Value = match response.json().await {
        Ok(v) => v,
        Err(e) => {
          error!("RPC {} body unreadable while probing {}: {}", url, probe.field_name(), e);
          for token in *chunk {
            verified.insert_unverified(token);
          }
          continue;
        }
      };

      let results: Vec<RpcResponse> = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(_) => {
          error!("Incorrect response type from {} while probing {}", url, probe.field_name());
          continue;
        }
      };

      apply_probe_results(&mut verified, chunk, &results, probe);
    }
  }

  debug!("EVM verification produced {} records", verified.map.len());
  verified.into_tokens()
}

/// Walk one batch response, decoding each token's result slot
fn apply_probe_results(
  verified: &mut VerifiedSet,
  chunk: &[FungibleToken],
  results: &[RpcResponse],
  probe: Probe,
) {
  for (index, token) in chunk.iter().enumerate() {
    let raw = results
      .get(index)
      .and_then(|slot| slot.result.as_ref())
      .and_then(Value::as_str)
      .filter(|r| !r.is_empty());

    if let Some(raw) = raw {
      verified.enrich(token, probe, raw);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::method;
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn slot(raw: &str) -> RpcResponse {
    RpcResponse { result: Some(json!(raw)) }
  }

  fn empty_slot() -> RpcResponse {
    RpcResponse { result: None }
  }

  fn token(address: &str, symbol: &str) -> FungibleToken {
    FungibleToken {
      chain_id: "1".to_string(),
      address: address.to_string(),
      name: format!("{symbol} token"),
      symbol: symbol.to_string(),
      decimals: None,
      logo_uri: None,
      source: vec!["test".to_string()],
    }
  }

  #[test]
  fn test_decimals_probe_sets_decimals() {
    let mut verified = VerifiedSet::default();
    let chunk = vec![token("0xaa", "FOO")];
    let results =
      vec![slot("0x0000000000000000000000000000000000000000000000000000000000000012")];

    apply_probe_results(&mut verified, &chunk, &results, Probe::Decimals);

    let tokens = verified.into_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].decimals, Some(18));
  }

  #[test]
  fn test_missing_result_slot_skipped() {
    let mut verified = VerifiedSet::default();
    let chunk = vec![token("0xaa", "FOO"), token("0xbb", "BAR")];
    let results = vec![
      empty_slot(),
      slot("0x0000000000000000000000000000000000000000000000000000000000000006"),
    ];

    apply_probe_results(&mut verified, &chunk, &results, Probe::Decimals);

    let tokens = verified.into_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].address, "0xbb");
    assert_eq!(tokens[0].decimals, Some(6));
  }

  #[test]
  fn test_undecodable_value_keeps_token_without_field() {
    let mut verified = VerifiedSet::default();
    let chunk = vec![token("0xaa", "FOO")];
    // bytes32-style symbol that the string decoder rejects
    let results =
      vec![slot("0x4d4b520000000000000000000000000000000000000000000000000000000000")];

    apply_probe_results(&mut verified, &chunk, &results, Probe::Symbol);

    let tokens = verified.into_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].symbol, "FOO");
  }

  #[test]
  fn test_later_probe_merges_onto_accumulated_record() {
    let mut verified = VerifiedSet::default();
    let chunk = vec![token("0xaa", "FOO")];

    apply_probe_results(
      &mut verified,
      &chunk,
      &[slot("0x0000000000000000000000000000000000000000000000000000000000000012")],
      Probe::Decimals,
    );
    apply_probe_results(
      &mut verified,
      &chunk,
      &[slot(
        "0x\
        0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000000000004\
        5553444300000000000000000000000000000000000000000000000000000000",
      )],
      Probe::Symbol,
    );

    let tokens = verified.into_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].decimals, Some(18));
    assert_eq!(tokens[0].symbol, "USDC");
  }

  #[test]
  fn test_insert_unverified_clobbers_enrichment() {
    let mut verified = VerifiedSet::default();
    let t = token("0xaa", "FOO");

    verified.enrich(
      &t,
      Probe::Decimals,
      "0x0000000000000000000000000000000000000000000000000000000000000012",
    );
    verified.insert_unverified(&t);

    let tokens = verified.into_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].decimals, None);
  }

  #[tokio::test]
  async fn test_transport_failure_is_fail_open() {
    let client = Client::new();
    let tokens = vec![token("0xaa", "FOO"), token("0xbb", "BAR")];

    // Unroutable endpoint: every batch errors at the transport level
    let result = verify(&client, "http://127.0.0.1:1", tokens.clone(), 100).await;

    assert_eq!(result, tokens);
  }

  #[tokio::test]
  async fn test_http_error_skips_probe_without_reinserting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let client = Client::new();
    let tokens = vec![token("0xaa", "FOO")];

    let result = verify(&client, &server.uri(), tokens, 100).await;

    // Every probe got HTTP 500, so no record was ever accumulated
    assert!(result.is_empty());
  }

  #[tokio::test]
  async fn test_non_array_body_skips_probe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({"error": "rate limited"})),
      )
      .mount(&server)
      .await;

    let client = Client::new();
    let tokens = vec![token("0xaa", "FOO")];

    let result = verify(&client, &server.uri(), tokens, 100).await;

    assert!(result.is_empty());
  }

  #[tokio::test]
  async fn test_batch_results_applied_from_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        {"result": "0x0000000000000000000000000000000000000000000000000000000000000012"}
      ])))
      .mount(&server)
      .await;

    let client = Client::new();
    let tokens = vec![token("0xaa", "FOO")];

    let result = verify(&client, &server.uri(), tokens, 100).await;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].decimals, Some(18));
  }
}
