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

//! Account-model verification for Solana chains.
//!
//! One batched `getAccountInfo` call per chunk, all chunks launched
//! together and joined. Unlike the EVM verifier this one is
//! fail-closed: a failed or malformed batch drops its tokens, and a
//! token only survives when its parsed mint account carries a positive
//! decimals value.

use futures::future;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use tl_models::{FungibleToken, RpcRequest, RpcResponse};

/// Verify a token list against a Solana RPC endpoint.
pub async fn verify(
  client: &Client,
  url: &str,
  tokens: Vec<FungibleToken>,
  page_size: usize,
) -> Vec<FungibleToken> {
  let chunks = tokens.chunks(page_size.max(1));
  let batches = future::join_all(chunks.map(|chunk| verify_chunk(client, url, chunk))).await;

  let verified: Vec<FungibleToken> = batches.into_iter().flatten().collect();
  debug!("Solana verification kept {} of {} tokens", verified.len(), tokens.len());
  verified
}

async fn verify_chunk(client: &Client, url: &str, chunk: &[FungibleToken]) -> Vec<FungibleToken> {
  let body: Vec<RpcRequest> =
    chunk.iter().map(|t| RpcRequest::get_account_info(&t.address)).collect();

  let response = match client.post(url).json(&body).send().await {
    Ok(r) => r,
    Err(e) => {
      error!("RPC transport error from {}: {}", url, e);
      return Vec::new();
    }
  };

  if !response.status().is_success() {
    error!("RPC {} returned HTTP {}", url, response.status());
    return Vec::new();
  }

  let body: Value = match response.json().await {
    Ok(v) => v,
    Err(e) => {
      error!("RPC {} body unreadable: {}", url, e);
      return Vec::new();
    }
  };

  let results: Vec<RpcResponse> = match serde_json::from_value(body) {
    Ok(r) => r,
    Err(_) => {
      error!("Incorrect response type from {}", url);
      return Vec::new();
    }
  };

  gate_by_decimals(chunk, &results)
}

/// Keep only tokens whose account info yields a positive decimals value,
/// overwriting their decimals field with the on-chain one
fn gate_by_decimals(chunk: &[FungibleToken], results: &[RpcResponse]) -> Vec<FungibleToken> {
  results
    .iter()
    .enumerate()
    .filter_map(|(index, slot)| {
      let token = chunk.get(index)?;
      let decimals = account_decimals(slot)?;
      if decimals == 0 {
        return None;
      }
      let mut verified = token.clone();
      verified.decimals = Some(decimals);
      Some(verified)
    })
    .collect()
}

fn account_decimals(slot: &RpcResponse) -> Option<u32> {
  let value = slot
    .result
    .as_ref()?
    .get("value")?
    .get("data")?
    .get("parsed")?
    .get("info")?
    .get("decimals")?
    .as_u64()?;
  u32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::method;
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn token(address: &str) -> FungibleToken {
    FungibleToken {
      chain_id: "101".to_string(),
      address: address.to_string(),
      name: "Token".to_string(),
      symbol: "TOK".to_string(),
      decimals: None,
      logo_uri: None,
      source: vec!["test".to_string()],
    }
  }

  fn account_slot(decimals: u64) -> RpcResponse {
    RpcResponse {
      result: Some(json!({
        "value": {
          "data": { "parsed": { "info": { "decimals": decimals } } }
        }
      })),
    }
  }

  #[test]
  fn test_positive_decimals_survive() {
    let chunk = vec![token("mint1")];
    let verified = gate_by_decimals(&chunk, &[account_slot(9)]);
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].decimals, Some(9));
  }

  #[test]
  fn test_zero_decimals_dropped() {
    let chunk = vec![token("mint1")];
    assert!(gate_by_decimals(&chunk, &[account_slot(0)]).is_empty());
  }

  #[test]
  fn test_missing_account_data_dropped() {
    let chunk = vec![token("mint1"), token("mint2")];
    let slots = vec![RpcResponse { result: Some(json!({"value": null})) }, account_slot(6)];
    let verified = gate_by_decimals(&chunk, &slots);
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].address, "mint2");
    assert_eq!(verified[0].decimals, Some(6));
  }

  #[test]
  fn test_extra_result_slots_ignored() {
    let chunk = vec![token("mint1")];
    let slots = vec![account_slot(2), account_slot(3)];
    let verified = gate_by_decimals(&chunk, &slots);
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].address, "mint1");
  }

  #[tokio::test]
  async fn test_transport_failure_is_fail_closed() {
    let client = Client::new();
    let tokens = vec![token("mint1"), token("mint2")];

    let verified = verify(&client, "http://127.0.0.1:1", tokens, 100).await;

    assert!(verified.is_empty());
  }

  #[tokio::test]
  async fn test_http_error_drops_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let client = Client::new();
    let tokens = vec![token("mint1"), token("mint2")];

    let verified = verify(&client, &server.uri(), tokens, 100).await;

    assert!(verified.is_empty());
  }

  #[tokio::test]
  async fn test_non_array_body_drops_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({"error": "rate limited"})),
      )
      .mount(&server)
      .await;

    let client = Client::new();
    let tokens = vec![token("mint1")];

    let verified = verify(&client, &server.uri(), tokens, 100).await;

    assert!(verified.is_empty());
  }

  #[tokio::test]
  async fn test_batch_results_applied_from_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        {"result": {"value": {"data": {"parsed": {"info": {"decimals": 9}}}}}}
      ])))
      .mount(&server)
      .await;

    let client = Client::new();
    let tokens = vec![token("mint1")];

    let verified = verify(&client, &server.uri(), tokens, 100).await;

    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].decimals, Some(9));
  }
}
