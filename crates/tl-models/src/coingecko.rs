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
use std::collections::HashMap;

/// One entry of the CoinGecko /coins/list catalog (include_platform=true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCoin {
  pub id: String,
  pub symbol: String,
  pub name: String,

  /// Platform key -> contract address. Coins without a deployment on a
  /// platform either omit the key or map it to an empty string.
  #[serde(default)]
  pub platforms: HashMap<String, String>,
}

impl CatalogCoin {
  /// Contract address under the given platform, treating empty strings
  /// as absent
  pub fn address_on(&self, platform: &str) -> Option<&str> {
    self.platforms.get(platform).map(String::as_str).filter(|a| !a.is_empty())
  }
}

/// One entry of the CoinGecko /coins/markets response; only the image
/// field is consumed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCoin {
  pub id: String,

  #[serde(default)]
  pub image: Option<String>,
}
