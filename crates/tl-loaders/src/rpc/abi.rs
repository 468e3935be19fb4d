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

//! Minimal ABI decoding for the two return types the verifier probes
//! produce: `uint8` and `string`. Anything that does not decode cleanly
//! is reported as `None` and the caller skips the field.

/// Decode a `uint8` return value from a 0x-prefixed eth_call result.
/// The value sits in the last byte of a single 32-byte word; any set bit
/// above that range means the contract returned something else.
pub fn decode_uint8(raw: &str) -> Option<u32> {
  let bytes = decode_hex(raw)?;
  if bytes.len() < 32 {
    return None;
  }
  let word = &bytes[..32];
  if word[..31].iter().any(|b| *b != 0) {
    return None;
  }
  Some(u32::from(word[31]))
}

/// Decode a `string` return value: offset word, length word, UTF-8
/// bytes. Empty strings decode to `None` so callers never overwrite a
/// real value with nothing.
pub fn decode_string(raw: &str) -> Option<String> {
  let bytes = decode_hex(raw)?;
  if bytes.len() < 64 {
    return None;
  }

  let offset = word_to_usize(bytes.get(..32)?)?;
  let start = offset.checked_add(32)?;
  let len = word_to_usize(bytes.get(offset..start)?)?;
  let data = bytes.get(start..start.checked_add(len)?)?;

  let text = std::str::from_utf8(data).ok()?.trim_end_matches('\0').to_string();
  if text.is_empty() {
    None
  } else {
    Some(text)
  }
}

fn decode_hex(raw: &str) -> Option<Vec<u8>> {
  let stripped = raw.strip_prefix("0x").unwrap_or(raw);
  if stripped.is_empty() {
    return None;
  }
  hex::decode(stripped).ok()
}

/// Interpret a 32-byte word as a small usize. Offsets and lengths in
/// well-formed returns fit in the last 8 bytes.
fn word_to_usize(word: &[u8]) -> Option<usize> {
  if word.len() != 32 || word[..24].iter().any(|b| *b != 0) {
    return None;
  }
  let mut value: u64 = 0;
  for b in &word[24..] {
    value = (value << 8) | u64::from(*b);
  }
  usize::try_from(value).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  const DECIMALS_18: &str = "0x0000000000000000000000000000000000000000000000000000000000000012";

  // "USDC" ABI-encoded as a string return value
  const SYMBOL_USDC: &str = "0x\
    0000000000000000000000000000000000000000000000000000000000000020\
    0000000000000000000000000000000000000000000000000000000000000004\
    5553444300000000000000000000000000000000000000000000000000000000";

  #[test]
  fn test_decode_uint8_hex_18() {
    assert_eq!(decode_uint8(DECIMALS_18), Some(18));
  }

  #[test]
  fn test_decode_uint8_zero() {
    let raw = format!("0x{}", "00".repeat(32));
    assert_eq!(decode_uint8(&raw), Some(0));
  }

  #[test]
  fn test_decode_uint8_rejects_wide_value() {
    // 256 does not fit in a uint8
    let raw = "0x0000000000000000000000000000000000000000000000000000000000000100";
    assert_eq!(decode_uint8(raw), None);
  }

  #[test]
  fn test_decode_uint8_rejects_short_and_empty() {
    assert_eq!(decode_uint8("0x"), None);
    assert_eq!(decode_uint8("0x12"), None);
    assert_eq!(decode_uint8("not hex"), None);
  }

  #[test]
  fn test_decode_string_usdc() {
    assert_eq!(decode_string(SYMBOL_USDC), Some("USDC".to_string()));
  }

  #[test]
  fn test_decode_string_empty_is_none() {
    let raw = "0x\
      0000000000000000000000000000000000000000000000000000000000000020\
      0000000000000000000000000000000000000000000000000000000000000000";
    assert_eq!(decode_string(raw), None);
  }

  #[test]
  fn test_decode_string_rejects_bytes32_symbol() {
    // MKR-style contracts return a bare bytes32, not an ABI string
    let raw = "0x4d4b520000000000000000000000000000000000000000000000000000000000";
    assert_eq!(decode_string(raw), None);
  }

  #[test]
  fn test_decode_string_rejects_truncated_data() {
    let raw = "0x\
      0000000000000000000000000000000000000000000000000000000000000020\
      00000000000000000000000000000000000000000000000000000000000000ff";
    assert_eq!(decode_string(raw), None);
  }
}
