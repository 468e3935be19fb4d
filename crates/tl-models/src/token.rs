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

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical token record flowing through the pipeline.
///
/// One record per `(address, chainId)` pair in the final output. `source`
/// carries the provenance labels of every feed that contributed to the
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FungibleToken {
  /// Chain identifier. Some upstream feeds emit this as a JSON number,
  /// others as a string; it is normalized to a string on the way in.
  #[serde(deserialize_with = "string_or_number", default)]
  pub chain_id: String,

  /// Token address, compared case-insensitively during merging
  pub address: String,

  #[serde(default)]
  pub name: String,

  #[serde(default)]
  pub symbol: String,

  /// On-chain decimals, unknown until RPC verification for some feeds
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub decimals: Option<u32>,

  #[serde(rename = "logoURI", skip_serializing_if = "Option::is_none", default)]
  pub logo_uri: Option<String>,

  /// Labels of the feeds that contributed this record
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub source: Vec<String>,
}

impl FungibleToken {
  /// Key used while merging token feeds: case-folded address and symbol
  /// plus the chain id. Stricter than the final dedup key, which compares
  /// addresses only.
  pub fn merge_key(&self) -> String {
    format!("{}_{}_{}", self.address.to_lowercase(), self.chain_id, self.symbol.to_lowercase())
  }

  /// Key used by the RPC verifiers. On-chain identity is address-based,
  /// so the symbol is deliberately absent here.
  pub fn rpc_key(&self) -> String {
    format!("{}_{}", self.address, self.chain_id)
  }

  /// Add a provenance label unless it is already present
  pub fn add_source(&mut self, label: &str) {
    if !self.source.iter().any(|s| s == label) {
      self.source.push(label.to_string());
    }
  }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = serde_json::Value::deserialize(deserializer)?;
  match value {
    serde_json::Value::String(s) => Ok(s),
    serde_json::Value::Number(n) => Ok(n.to_string()),
    other => Err(serde::de::Error::custom(format!("invalid chainId: {other}"))),
  }
}
