// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary index parsing under adversarial input.
//!
//! The index is fetched over the network by every visitor. A truncated
//! download, a proxy that mangles bytes, or a hand-crafted file must end in
//! an error, never a panic or an index that points outside itself.

#![no_main]

use docseek::binary::{deserialize, read_layout, serialize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Envelope checks alone must not panic either.
    let _ = read_layout(data);

    let Ok(index) = deserialize(data) else {
        return;
    };

    // Anything that decodes is internally consistent.
    assert_eq!(index.doc_count, index.documents.len());
    assert!(index.avg_dl.is_finite() && index.avg_dl >= 0.0);
    for (term, postings) in &index.index {
        let df = index.df[term];
        assert!(df >= 1 && df <= index.doc_count);
        for posting in postings {
            assert!(posting.doc_idx < index.doc_count);
        }
    }

    // And re-encodes to bytes that decode to the same index.
    let bytes = serialize(&index).expect("decoded index re-encodes");
    assert_eq!(deserialize(&bytes).expect("re-encoded index decodes"), index);
});
