/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

//! The `build` command: run the full pipeline over a chains directory.
//!
//! Expects one subdirectory per chain holding `chain.json` and
//! `tokens.json`. Anything malformed at this layer is fatal: partial
//! configuration would silently produce wrong lists.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use tl_core::Config;
use tl_loaders::{write_token_lists, ChainBundle, TokenListPipeline};
use tl_models::{Chain, FungibleToken};

#[derive(Args, Debug)]
pub struct BuildCommand {
  /// Directory holding one subdirectory per chain
  #[arg(long, default_value = "tokens")]
  pub tokens_dir: PathBuf,

  /// Output directory for the per-family token lists
  #[arg(long, default_value = "dist")]
  pub out_dir: PathBuf,
}

pub async fn execute(cmd: BuildCommand, config: Config) -> Result<()> {
  let bundles = read_chain_bundles(&cmd.tokens_dir)?;
  info!("Loaded {} chain configurations from {}", bundles.len(), cmd.tokens_dir.display());

  let pipeline = TokenListPipeline::new(&config)?;
  let families = pipeline.run(bundles).await;

  write_token_lists(&cmd.out_dir, &families)?;

  let total: usize = families.values().map(Vec::len).sum();
  info!("Built {} token lists ({} tokens) in {}", families.len(), total, cmd.out_dir.display());
  Ok(())
}

/// Read every chain subdirectory, sorted by name for a stable chain
/// order. Both files are required per chain.
fn read_chain_bundles(tokens_dir: &Path) -> Result<Vec<ChainBundle>> {
  let mut dirs: Vec<PathBuf> = fs::read_dir(tokens_dir)
    .with_context(|| format!("failed to read chains directory {}", tokens_dir.display()))?
    .filter_map(|entry| entry.ok().map(|e| e.path()))
    .filter(|path| path.is_dir())
    .collect();
  dirs.sort();

  let mut bundles = Vec::with_capacity(dirs.len());
  for dir in dirs {
    let chain_path = dir.join("chain.json");
    let raw_chain = fs::read_to_string(&chain_path)
      .with_context(|| format!("failed to read {}", chain_path.display()))?;
    let chain: Chain = serde_json::from_str(&raw_chain)
      .with_context(|| format!("failed to parse {}", chain_path.display()))?;

    let tokens_path = dir.join("tokens.json");
    let raw_tokens = fs::read_to_string(&tokens_path)
      .with_context(|| format!("failed to read {}", tokens_path.display()))?;
    let local_tokens: Vec<FungibleToken> = serde_json::from_str(&raw_tokens)
      .with_context(|| format!("failed to parse {}", tokens_path.display()))?;

    bundles.push(ChainBundle { chain, local_tokens });
  }

  Ok(bundles)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_chain(dir: &Path, id: &str, impl_name: &str) {
    let chain_dir = dir.join(id);
    fs::create_dir_all(&chain_dir).unwrap();
    fs::write(
      chain_dir.join("chain.json"),
      format!(r#"{{"id":"{id}","chainId":"1","impl":"{impl_name}"}}"#),
    )
    .unwrap();
    fs::write(
      chain_dir.join("tokens.json"),
      r#"[{"chainId":"1","address":"0xaa","name":"Foo","symbol":"FOO","decimals":18}]"#,
    )
    .unwrap();
  }

  #[test]
  fn test_read_chain_bundles_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_chain(dir.path(), "polygon", "evm");
    write_chain(dir.path(), "ethereum", "evm");

    let bundles = read_chain_bundles(dir.path()).unwrap();
    assert_eq!(bundles.len(), 2);
    assert_eq!(bundles[0].chain.id, "ethereum");
    assert_eq!(bundles[1].chain.id, "polygon");
    assert_eq!(bundles[0].local_tokens.len(), 1);
  }

  #[test]
  fn test_read_chain_bundles_missing_tokens_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let chain_dir = dir.path().join("ethereum");
    fs::create_dir_all(&chain_dir).unwrap();
    fs::write(chain_dir.join("chain.json"), r#"{"id":"eth","chainId":"1","impl":"evm"}"#)
      .unwrap();

    let err = read_chain_bundles(dir.path()).unwrap_err();
    assert!(err.to_string().contains("tokens.json"));
  }

  #[test]
  fn test_read_chain_bundles_malformed_chain_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let chain_dir = dir.path().join("ethereum");
    fs::create_dir_all(&chain_dir).unwrap();
    fs::write(chain_dir.join("chain.json"), "{not json").unwrap();
    fs::write(chain_dir.join("tokens.json"), "[]").unwrap();

    let err = read_chain_bundles(dir.path()).unwrap_err();
    assert!(err.to_string().contains("chain.json"));
  }

  #[test]
  fn test_read_chain_bundles_skips_plain_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("README.md"), "not a chain").unwrap();
    write_chain(dir.path(), "solana", "sol");

    let bundles = read_chain_bundles(dir.path()).unwrap();
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].chain.id, "solana");
  }
}
