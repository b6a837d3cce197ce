// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint, length-prefixed strings, front compression.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>
//!
//! - **Front Compression**: Incremental encoding for sorted string sequences.
//!   Witten, Moffat, Bell (1999): "Managing Gigabytes", §3.3 "Front Coding".

use super::header::MAX_VARINT_BYTES;
use crate::error::FormatError;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Fails on an empty buffer, a buffer that ends mid-varint, or a varint longer
/// than `MAX_VARINT_BYTES` (malformed or malicious input).
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), FormatError> {
    let mut result: u64 = 0;
    let mut shift = 0;

    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let low = (byte & 0x7F) as u64;
        // The tenth byte may only carry the single top bit of a u64.
        if shift == 63 && low > 1 {
            return Err(FormatError::InvalidData("varint overflows u64".into()));
        }
        result |= low << shift;
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    if bytes.len() >= MAX_VARINT_BYTES {
        Err(FormatError::InvalidData(
            "varint exceeds maximum length".into(),
        ))
    } else {
        Err(FormatError::Truncated("varint"))
    }
}

// ============================================================================
// STRINGS
// ============================================================================

/// Write a varint length followed by the UTF-8 bytes.
pub fn encode_str(s: &str, buf: &mut Vec<u8>) {
    encode_varint(s.len() as u64, buf);
    buf.extend_from_slice(s.as_bytes());
}

/// Write a varint count followed by each string, length-prefixed.
pub fn encode_str_list(items: &[String], buf: &mut Vec<u8>) {
    encode_varint(items.len() as u64, buf);
    for item in items {
        encode_str(item, buf);
    }
}

// ============================================================================
// FRONT COMPRESSION
// ============================================================================

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Encode one term against the previous term in sorted order.
///
/// Format: shared prefix length (varint), suffix length (varint), suffix bytes.
/// The split is on bytes, so a suffix may start mid-character; the decoder
/// validates UTF-8 on the reassembled term.
pub fn encode_front_compressed(prev: &str, term: &str, buf: &mut Vec<u8>) {
    let bytes = term.as_bytes();
    let shared = common_prefix_len(prev.as_bytes(), bytes);
    let suffix = &bytes[shared..];

    encode_varint(shared as u64, buf);
    encode_varint(suffix.len() as u64, buf);
    buf.extend_from_slice(suffix);
}

// ============================================================================
// READER
// ============================================================================

/// Bounds-checked cursor over one section.
///
/// Every read names what it was reading, so a truncated file reports
/// "truncated document title" rather than a bare EOF.
#[derive(Debug)]
pub struct SectionReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SectionReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub fn varint(&mut self, what: &'static str) -> Result<u64, FormatError> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos..]).map_err(|e| match e {
            FormatError::Truncated(_) => FormatError::Truncated(what),
            other => other,
        })?;
        self.pos += consumed;
        Ok(value)
    }

    /// A varint that will be used as a count or length in memory.
    pub fn usize(&mut self, what: &'static str) -> Result<usize, FormatError> {
        let value = self.varint(what)?;
        usize::try_from(value)
            .map_err(|_| FormatError::InvalidData(format!("{} {} does not fit in memory", what, value)))
    }

    /// A count of items that each take at least one byte.
    ///
    /// Rejects counts larger than the bytes left, so a forged count can't
    /// trigger a huge `Vec::with_capacity`.
    pub fn count(&mut self, what: &'static str) -> Result<usize, FormatError> {
        let count = self.usize(what)?;
        if count > self.remaining() {
            return Err(FormatError::InvalidData(format!(
                "{} {} exceeds remaining {} bytes",
                what,
                count,
                self.remaining()
            )));
        }
        Ok(count)
    }

    pub fn u8(&mut self, what: &'static str) -> Result<u8, FormatError> {
        let byte = *self.bytes.get(self.pos).ok_or(FormatError::Truncated(what))?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn take(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], FormatError> {
        let end = self.pos.checked_add(len).ok_or(FormatError::Truncated(what))?;
        let slice = self.bytes.get(self.pos..end).ok_or(FormatError::Truncated(what))?;
        self.pos = end;
        Ok(slice)
    }

    pub fn string(&mut self, what: &'static str) -> Result<String, FormatError> {
        let len = self.usize(what)?;
        let raw = self.take(len, what)?;
        String::from_utf8(raw.to_vec())
            .map_err(|e| FormatError::InvalidData(format!("invalid UTF-8 in {}: {}", what, e)))
    }

    pub fn string_list(&mut self, what: &'static str) -> Result<Vec<String>, FormatError> {
        let count = self.count(what)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.string(what)?);
        }
        Ok(items)
    }

    /// Decode one front-compressed term given the previous term.
    pub fn front_compressed(&mut self, prev: &str) -> Result<String, FormatError> {
        let shared = self.usize("vocabulary prefix")?;
        if shared > prev.len() {
            return Err(FormatError::InvalidData(format!(
                "shared prefix length {} exceeds previous term length {}",
                shared,
                prev.len()
            )));
        }
        let suffix_len = self.usize("vocabulary suffix")?;
        let suffix = self.take(suffix_len, "vocabulary suffix")?;

        let mut term = Vec::with_capacity(shared + suffix_len);
        term.extend_from_slice(&prev.as_bytes()[..shared]);
        term.extend_from_slice(suffix);
        String::from_utf8(term)
            .map_err(|e| FormatError::InvalidData(format!("invalid UTF-8 in term: {}", e)))
    }
}
