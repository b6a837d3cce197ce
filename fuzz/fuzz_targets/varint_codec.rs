// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Varint (LEB128) decoding of arbitrary bytes.
//!
//! Every count and length in the index is a varint, so the decoder sees
//! attacker-controlled bytes first.

#![no_main]

use docseek::binary::{decode_varint, encode_varint, MAX_VARINT_BYTES};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok((value, consumed)) = decode_varint(data) else {
        return;
    };

    assert!(consumed >= 1 && consumed <= data.len().min(MAX_VARINT_BYTES));

    // Re-encoding is canonical: minimal length, decodes to the same value.
    let mut encoded = Vec::new();
    encode_varint(value, &mut encoded);
    assert!(encoded.len() <= consumed);
    assert_eq!(decode_varint(&encoded).ok(), Some((value, encoded.len())));
});
