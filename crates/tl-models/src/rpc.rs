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
use serde_json::{json, Value};

/// One JSON-RPC 2.0 request. Verifiers POST arrays of these as a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
  pub jsonrpc: String,
  pub id: u32,
  pub method: String,
  pub params: Value,
}

impl RpcRequest {
  /// `eth_call` against `to` with the given calldata, at the latest block
  pub fn eth_call(to: &str, data: &str) -> Self {
    RpcRequest {
      jsonrpc: "2.0".to_string(),
      id: 1,
      method: "eth_call".to_string(),
      params: json!([{ "to": to, "data": data }, "latest"]),
    }
  }

  /// Solana `getAccountInfo` with jsonParsed encoding
  pub fn get_account_info(address: &str) -> Self {
    RpcRequest {
      jsonrpc: "2.0".to_string(),
      id: 1,
      method: "getAccountInfo".to_string(),
      params: json!([address, { "encoding": "jsonParsed" }]),
    }
  }
}

/// One JSON-RPC response slot. Error slots and missing results both
/// deserialize to `result: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
  #[serde(default)]
  pub result: Option<Value>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_eth_call_shape() {
    let req = RpcRequest::eth_call("0xabc", "0x313ce567");
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["jsonrpc"], "2.0");
    assert_eq!(v["method"], "eth_call");
    assert_eq!(v["params"][0]["to"], "0xabc");
    assert_eq!(v["params"][0]["data"], "0x313ce567");
    assert_eq!(v["params"][1], "latest");
  }

  #[test]
  fn test_get_account_info_shape() {
    let req = RpcRequest::get_account_info("So11111111111111111111111111111111111111112");
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["method"], "getAccountInfo");
    assert_eq!(v["params"][1]["encoding"], "jsonParsed");
  }

  #[test]
  fn test_response_error_slot() {
    let resp: RpcResponse =
      serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000}}"#).unwrap();
    assert!(resp.result.is_none());
  }

  #[test]
  fn test_response_with_result() {
    let resp: RpcResponse = serde_json::from_str(r#"{"result":"0x12"}"#).unwrap();
    assert_eq!(resp.result, Some(Value::String("0x12".to_string())));
  }
}
