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

//! The `check` command: validate local static token files before a
//! build. Runs in CI so a bad hand-edited record never reaches the
//! pipeline.

use anyhow::{bail, Context, Result};
use clap::Args;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Character class allowed in token names: letters including extended
/// Latin, digits, space and . ' + - % /
const NAME_PATTERN: &str = r"^[ A-Za-z0-9_.'+\-%/À-ÖØ-öø-ÿ]+$";

#[derive(Args, Debug)]
pub struct CheckCommand {
  /// Directory holding one subdirectory per chain
  #[arg(long, default_value = "tokens")]
  pub tokens_dir: PathBuf,
}

pub fn execute(cmd: CheckCommand) -> Result<()> {
  let name_re = Regex::new(NAME_PATTERN)?;

  let mut dirs: Vec<PathBuf> = fs::read_dir(&cmd.tokens_dir)
    .with_context(|| format!("failed to read chains directory {}", cmd.tokens_dir.display()))?
    .filter_map(|entry| entry.ok().map(|e| e.path()))
    .filter(|path| path.is_dir())
    .collect();
  dirs.sort();

  for dir in &dirs {
    let path = dir.join("tokens.json");
    let raw =
      fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let tokens: Value = serde_json::from_str(&raw)
      .with_context(|| format!("failed to parse {}", path.display()))?;

    check_token_array(&tokens, &name_re, &path)?;
  }

  info!("Checked {} token files", dirs.len());
  Ok(())
}

fn check_token_array(tokens: &Value, name_re: &Regex, path: &Path) -> Result<()> {
  let Some(records) = tokens.as_array() else {
    bail!("tokens.json must be an array: {}", path.display());
  };

  for record in records {
    let symbol_ok = record.get("symbol").map(Value::is_string).unwrap_or(false);
    let decimals_ok = record.get("decimals").map(Value::is_number).unwrap_or(false);
    let name_ok = record
      .get("name")
      .and_then(Value::as_str)
      .map(|name| name_re.is_match(name))
      .unwrap_or(false);

    if !symbol_ok || !decimals_ok || !name_ok {
      bail!(
        "The format of the token does not match the schema, please check it in {}: {}",
        path.display(),
        record
      );
    }
  }

  Ok(())
}
