// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for docseek search indexes.
//!
//! One file, written once per site build and fetched once per browser
//! session. The layout is plain enough that a reader in any language can
//! walk it with a varint decoder and a CRC32.
//!
//! # Security Considerations
//!
//! This format is designed to be safely parsed from untrusted sources:
//! - All size fields are validated against MAX_* constants
//! - Bounds checking prevents buffer overreads
//! - CRC32 footer detects corruption/truncation
//! - Varint decoder has maximum iteration limits
//! - Every posting's document index and field tag are checked
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (40 bytes)                                          │
//! │   magic: [u8; 4] = "DSEK"                                  │
//! │   version: u8 = 1, flags: u8, reserved: [u8; 2]            │
//! │   doc_count: u32, term_count: u32                          │
//! │   avg_dl: f64 (IEEE-754 bits)                              │
//! │   docs_len: u32, vocab_len: u32, postings_len: u32         │
//! │   reserved: u32                                            │
//! ├────────────────────────────────────────────────────────────┤
//! │ DOCS: per document                                         │
//! │   id, title, url, body (varint len + UTF-8)                │
//! │   headings[], code[] (varint count + strings)              │
//! ├────────────────────────────────────────────────────────────┤
//! │ VOCABULARY: varint count, then per term (sorted)           │
//! │   shared prefix varint, suffix len varint, suffix bytes    │
//! │   df varint                                                │
//! ├────────────────────────────────────────────────────────────┤
//! │ POSTINGS: per term, in vocabulary order                    │
//! │   varint count, then (doc delta varint, tf varint, field)  │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "KESD"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field tags: 0 = title, 1 = heading, 2 = body, 3 = code.

mod encoding;
mod header;

use std::collections::BTreeMap;

pub use encoding::{decode_varint, encode_varint};
pub use header::{
    DocseekFooter, DocseekHeader, SectionOffsets, FOOTER_MAGIC, MAGIC, MAX_DOC_COUNT,
    MAX_FILE_SIZE, MAX_TERM_COUNT, MAX_VARINT_BYTES, VERSION,
};

use encoding::{encode_front_compressed, encode_str, encode_str_list, SectionReader};

use crate::error::{FormatError, LoadError};
use crate::types::{Field, Posting, SearchDocument, SearchIndex};

// ============================================================================
// SERIALIZE
// ============================================================================

/// Serialize an index to the binary format.
///
/// Fails if the index is larger than the format can describe (more than
/// `MAX_DOC_COUNT` documents, `MAX_TERM_COUNT` terms, or a section over
/// 4 GiB), or if it is not one `deserialize` would give back unchanged.
/// Output is deterministic: the same index always yields the same bytes.
pub fn serialize(index: &SearchIndex) -> Result<Vec<u8>, FormatError> {
    check_limit("document count", index.documents.len(), MAX_DOC_COUNT)?;
    check_limit("term count", index.index.len(), MAX_TERM_COUNT)?;
    check_consistent(index)?;

    let docs_bytes = encode_docs(&index.documents);
    let vocab_bytes = encode_vocabulary(index);
    let postings_bytes = encode_postings(index);

    let header = DocseekHeader {
        version: VERSION,
        flags: 0,
        doc_count: to_u32("document count", index.documents.len())?,
        term_count: to_u32("term count", index.index.len())?,
        avg_dl: index.avg_dl,
        docs_len: to_u32("docs section", docs_bytes.len())?,
        vocab_len: to_u32("vocabulary section", vocab_bytes.len())?,
        postings_len: to_u32("postings section", postings_bytes.len())?,
    };

    let total_size = header.section_offsets().total_size();
    let mut buf = Vec::with_capacity(total_size);
    header.write(&mut buf);
    buf.extend_from_slice(&docs_bytes);
    buf.extend_from_slice(&vocab_bytes);
    buf.extend_from_slice(&postings_bytes);

    let crc32 = DocseekFooter::compute_crc32(&buf);
    DocseekFooter { crc32 }.write(&mut buf);

    debug_assert_eq!(buf.len(), total_size);
    tracing::debug!(
        bytes = buf.len(),
        docs = docs_bytes.len(),
        vocabulary = vocab_bytes.len(),
        postings = postings_bytes.len(),
        "serialized index"
    );

    Ok(buf)
}

fn check_limit(what: &'static str, value: usize, limit: usize) -> Result<(), FormatError> {
    if value > limit {
        return Err(FormatError::TooLarge { what, value, limit });
    }
    Ok(())
}

/// The same structural rules `deserialize` enforces, checked on the way out.
fn check_consistent(index: &SearchIndex) -> Result<(), FormatError> {
    let doc_count = index.documents.len();
    if index.doc_count != doc_count {
        return Err(FormatError::InvalidData(format!(
            "doc_count {} but {} documents",
            index.doc_count, doc_count
        )));
    }
    if !index.avg_dl.is_finite() || index.avg_dl < 0.0 {
        return Err(FormatError::InvalidData(format!(
            "average document length {} is not a non-negative number",
            index.avg_dl
        )));
    }
    if index.df.len() != index.index.len() {
        return Err(FormatError::InvalidData(format!(
            "{} df entries for {} terms",
            index.df.len(),
            index.index.len()
        )));
    }

    for (term, postings) in &index.index {
        match index.df.get(term) {
            Some(&df) if df >= 1 && df <= doc_count => {}
            Some(&df) => {
                return Err(FormatError::InvalidData(format!(
                    "document frequency {} for '{}' outside 1..={}",
                    df, term, doc_count
                )))
            }
            None => {
                return Err(FormatError::InvalidData(format!(
                    "no document frequency for '{}'",
                    term
                )))
            }
        }

        let mut prev_doc = 0usize;
        for posting in postings {
            if posting.doc_idx >= doc_count {
                return Err(FormatError::InvalidData(format!(
                    "posting for '{}' points at document {} of {}",
                    term, posting.doc_idx, doc_count
                )));
            }
            if posting.doc_idx < prev_doc {
                return Err(FormatError::InvalidData(format!(
                    "postings for '{}' not sorted by document",
                    term
                )));
            }
            prev_doc = posting.doc_idx;
        }
    }
    Ok(())
}

fn to_u32(what: &'static str, value: usize) -> Result<u32, FormatError> {
    u32::try_from(value).map_err(|_| FormatError::TooLarge {
        what,
        value,
        limit: u32::MAX as usize,
    })
}

fn encode_docs(documents: &[SearchDocument]) -> Vec<u8> {
    let mut buf = Vec::new();
    for doc in documents {
        encode_str(&doc.id, &mut buf);
        encode_str(&doc.title, &mut buf);
        encode_str(&doc.url, &mut buf);
        encode_str(&doc.body, &mut buf);
        encode_str_list(&doc.headings, &mut buf);
        encode_str_list(&doc.code, &mut buf);
    }
    buf
}

fn encode_vocabulary(index: &SearchIndex) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(index.index.len() as u64, &mut buf);

    let mut prev = "";
    for term in index.index.keys() {
        encode_front_compressed(prev, term, &mut buf);
        encode_varint(index.df[term] as u64, &mut buf);
        prev = term;
    }
    buf
}

fn encode_postings(index: &SearchIndex) -> Vec<u8> {
    let mut buf = Vec::new();
    for postings in index.index.values() {
        encode_varint(postings.len() as u64, &mut buf);
        let mut prev_doc = 0usize;
        for posting in postings {
            // Sorted by doc_idx, checked before encoding.
            encode_varint((posting.doc_idx - prev_doc) as u64, &mut buf);
            encode_varint(posting.tf as u64, &mut buf);
            buf.push(posting.field.to_u8());
            prev_doc = posting.doc_idx;
        }
    }
    buf
}

// ============================================================================
// DESERIALIZE
// ============================================================================

/// Header and section layout of a file, without decoding any section.
///
/// Used by `docseek inspect` to describe files that may be corrupt.
#[derive(Debug, Clone)]
pub struct FileLayout {
    pub header: DocseekHeader,
    pub offsets: SectionOffsets,
    pub footer: DocseekFooter,
    /// CRC32 of the content as it is on disk.
    pub computed_crc32: u32,
}

impl FileLayout {
    pub fn checksum_ok(&self) -> bool {
        self.footer.crc32 == self.computed_crc32
    }
}

/// Validate the envelope of a binary index: size limits, header magic and
/// version, footer magic, and section lengths against the file size.
///
/// Does not check the CRC; see [`FileLayout::checksum_ok`].
pub fn read_layout(bytes: &[u8]) -> Result<FileLayout, FormatError> {
    check_limit("file size", bytes.len(), MAX_FILE_SIZE)?;

    let min = DocseekHeader::SIZE + DocseekFooter::SIZE;
    if bytes.len() < min {
        return Err(FormatError::TooSmall {
            size: bytes.len(),
            min,
        });
    }

    let header = DocseekHeader::read(bytes)?;
    check_limit("document count", header.doc_count as usize, MAX_DOC_COUNT)?;
    check_limit("term count", header.term_count as usize, MAX_TERM_COUNT)?;

    let footer = DocseekFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - DocseekFooter::SIZE];

    let offsets = header.section_offsets();
    if offsets.total_size() != bytes.len() {
        return Err(FormatError::InvalidData(format!(
            "section lengths mismatch: header describes {} bytes, file has {}",
            offsets.total_size(),
            bytes.len()
        )));
    }

    Ok(FileLayout {
        header,
        offsets,
        footer,
        computed_crc32: DocseekFooter::compute_crc32(content),
    })
}

/// Decode index bytes in either encoding.
///
/// Binary files start with the "DSEK" magic; JSON starts with `{`. Anything
/// else is handed to the binary decoder so the error names the bad magic.
pub fn decode_index(bytes: &[u8]) -> Result<SearchIndex, LoadError> {
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if !bytes.starts_with(&MAGIC) && first == Some(&b'{') {
        let json = std::str::from_utf8(bytes)
            .map_err(|e| FormatError::InvalidData(format!("index JSON is not UTF-8: {}", e)))?;
        return Ok(SearchIndex::from_json(json)?);
    }
    Ok(deserialize(bytes)?)
}

/// Deserialize an index from the binary format.
///
/// # Validation
///
/// 1. File size is within `MAX_FILE_SIZE` and at least header + footer
/// 2. Header magic ("DSEK") and version
/// 3. Footer magic ("KESD") and section lengths match the file size
/// 4. CRC32 checksum matches
/// 5. Every section decodes exactly to its end, counts match the header
/// 6. Every posting points at a real document with a known field tag
pub fn deserialize(bytes: &[u8]) -> Result<SearchIndex, FormatError> {
    let layout = read_layout(bytes)?;
    if !layout.checksum_ok() {
        return Err(FormatError::ChecksumMismatch {
            stored: layout.footer.crc32,
            computed: layout.computed_crc32,
        });
    }

    let header = &layout.header;
    let offsets = &layout.offsets;
    let section = |range: (usize, usize), name: &'static str| {
        offsets.slice(bytes, range).ok_or(FormatError::Truncated(name))
    };

    if !header.avg_dl.is_finite() || header.avg_dl < 0.0 {
        return Err(FormatError::InvalidData(format!(
            "average document length {} is not a non-negative number",
            header.avg_dl
        )));
    }

    let doc_count = header.doc_count as usize;
    let documents = decode_docs(section(offsets.docs, "docs section")?, doc_count)?;
    let vocabulary = decode_vocabulary(
        section(offsets.vocabulary, "vocabulary section")?,
        header.term_count as usize,
        doc_count,
    )?;
    let lists = decode_postings(
        section(offsets.postings, "postings section")?,
        vocabulary.len(),
        doc_count,
    )?;

    let mut index = BTreeMap::new();
    let mut df = BTreeMap::new();
    for ((term, term_df), postings) in vocabulary.into_iter().zip(lists) {
        df.insert(term.clone(), term_df);
        index.insert(term, postings);
    }

    Ok(SearchIndex {
        documents,
        index,
        df,
        avg_dl: header.avg_dl,
        doc_count,
    })
}

fn decode_docs(bytes: &[u8], doc_count: usize) -> Result<Vec<SearchDocument>, FormatError> {
    // Each document takes at least six bytes (four empty strings, two empty lists).
    if doc_count > bytes.len() / 6 {
        return Err(FormatError::InvalidData(format!(
            "{} documents cannot fit in {} bytes",
            doc_count,
            bytes.len()
        )));
    }

    let mut reader = SectionReader::new(bytes);
    let mut documents = Vec::with_capacity(doc_count);
    for _ in 0..doc_count {
        documents.push(SearchDocument {
            id: reader.string("document id")?,
            title: reader.string("document title")?,
            url: reader.string("document url")?,
            body: reader.string("document body")?,
            headings: reader.string_list("document headings")?,
            code: reader.string_list("document code blocks")?,
        });
    }
    expect_exhausted(&reader, "docs section")?;
    Ok(documents)
}

fn decode_vocabulary(
    bytes: &[u8],
    term_count: usize,
    doc_count: usize,
) -> Result<Vec<(String, usize)>, FormatError> {
    let mut reader = SectionReader::new(bytes);
    let count = reader.count("vocabulary count")?;
    if count != term_count {
        return Err(FormatError::InvalidData(format!(
            "vocabulary has {} terms, header says {}",
            count, term_count
        )));
    }

    let mut terms: Vec<(String, usize)> = Vec::with_capacity(count);
    let mut prev = String::new();
    for _ in 0..count {
        let term = reader.front_compressed(&prev)?;
        if !terms.is_empty() && term <= prev {
            return Err(FormatError::InvalidData(format!(
                "vocabulary not strictly sorted at '{}'",
                term
            )));
        }
        let df = reader.usize("document frequency")?;
        if df == 0 || df > doc_count {
            return Err(FormatError::InvalidData(format!(
                "document frequency {} for '{}' outside 1..={}",
                df, term, doc_count
            )));
        }
        prev = term.clone();
        terms.push((term, df));
    }
    expect_exhausted(&reader, "vocabulary section")?;
    Ok(terms)
}

fn decode_postings(
    bytes: &[u8],
    term_count: usize,
    doc_count: usize,
) -> Result<Vec<Vec<Posting>>, FormatError> {
    let mut reader = SectionReader::new(bytes);
    let mut lists = Vec::with_capacity(term_count);

    for _ in 0..term_count {
        let count = reader.count("posting count")?;
        let mut postings = Vec::with_capacity(count);
        let mut doc_idx = 0usize;
        for _ in 0..count {
            let delta = reader.usize("posting doc delta")?;
            doc_idx = doc_idx
                .checked_add(delta)
                .filter(|&idx| idx < doc_count)
                .ok_or_else(|| {
                    FormatError::InvalidData(format!(
                        "posting points past document {}",
                        doc_count.saturating_sub(1)
                    ))
                })?;
            let tf = reader.varint("posting tf")?;
            let tf = u32::try_from(tf)
                .map_err(|_| FormatError::InvalidData(format!("term frequency {} too large", tf)))?;
            let tag = reader.u8("posting field")?;
            let field = Field::from_u8(tag)
                .ok_or_else(|| FormatError::InvalidData(format!("unknown field tag {}", tag)))?;
            postings.push(Posting { doc_idx, tf, field });
        }
        lists.push(postings);
    }
    expect_exhausted(&reader, "postings section")?;
    Ok(lists)
}

fn expect_exhausted(reader: &SectionReader<'_>, what: &str) -> Result<(), FormatError> {
    if !reader.is_exhausted() {
        return Err(FormatError::InvalidData(format!(
            "{} has {} trailing bytes after offset {}",
            what,
            reader.remaining(),
            reader.position()
        )));
    }
    Ok(())
}
