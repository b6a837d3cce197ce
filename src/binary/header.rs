// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format header and footer structures.
//!
//! The header is 40 bytes of fixed-size fields, parsed before anything else.
//! It carries the corpus statistics and the length of every section, so a
//! reader knows the whole layout up front and can reject a truncated file
//! without touching section data.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("KESD", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.
//!
//! `SectionOffsets` is the only place that knows the section order. Both the
//! writer and the reader go through it.

use crc32fast::Hasher as Crc32Hasher;

use crate::error::FormatError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "DSEK" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"DSEK";

/// Footer magic: "KESD" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"KESD";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 100 MB
pub const MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

/// Maximum number of documents
pub const MAX_DOC_COUNT: usize = 10_000_000;

/// Maximum number of terms
pub const MAX_TERM_COUNT: usize = 10_000_000;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// HEADER
// ============================================================================

/// Binary format header (40 bytes fixed size)
#[derive(Debug, Clone, PartialEq)]
pub struct DocseekHeader {
    pub version: u8,
    /// No bits are defined yet. Written as zero, ignored on read.
    pub flags: u8,
    pub doc_count: u32,
    pub term_count: u32,
    /// Mean body length, stored as raw IEEE-754 bits so it survives exactly.
    pub avg_dl: f64,
    pub docs_len: u32,
    pub vocab_len: u32,
    pub postings_len: u32,
}

impl DocseekHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved)
    // + 2*4 (counts) + 8 (avg_dl) + 3*4 (section lengths) + 4 (reserved) = 40
    pub const SIZE: usize = 40;

    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&MAGIC);
        buf.push(self.version);
        buf.push(self.flags);
        buf.extend_from_slice(&[0u8; 2]); // reserved
        buf.extend_from_slice(&self.doc_count.to_le_bytes());
        buf.extend_from_slice(&self.term_count.to_le_bytes());
        buf.extend_from_slice(&self.avg_dl.to_bits().to_le_bytes());
        buf.extend_from_slice(&self.docs_len.to_le_bytes());
        buf.extend_from_slice(&self.vocab_len.to_le_bytes());
        buf.extend_from_slice(&self.postings_len.to_le_bytes());
        buf.extend_from_slice(&[0u8; 4]); // reserved
    }

    /// Parse the header from the start of `bytes`.
    ///
    /// Checks magic and version only. Counts and lengths are validated by the
    /// caller against the actual file size.
    pub fn read(bytes: &[u8]) -> Result<Self, FormatError> {
        let buf: &[u8; Self::SIZE] = bytes
            .get(..Self::SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(FormatError::TooSmall {
                size: bytes.len(),
                min: Self::SIZE,
            })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != MAGIC {
            return Err(FormatError::BadMagic {
                expected: MAGIC,
                found: magic,
            });
        }

        let version = buf[4];
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion {
                found: version,
                expected: VERSION,
            });
        }

        let u32_at = |at: usize| u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        let mut bits = [0u8; 8];
        bits.copy_from_slice(&buf[16..24]);

        Ok(Self {
            version,
            flags: buf[5],
            // buf[6..8] is reserved
            doc_count: u32_at(8),
            term_count: u32_at(12),
            avg_dl: f64::from_bits(u64::from_le_bytes(bits)),
            docs_len: u32_at(24),
            vocab_len: u32_at(28),
            postings_len: u32_at(32),
            // buf[36..40] is reserved
        })
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte ranges, computed from header lengths.
///
/// Layout order:
/// 1. HEADER      [40B]
/// 2. DOCS        [docs_len]
/// 3. VOCABULARY  [vocab_len]
/// 4. POSTINGS    [postings_len]
/// 5. FOOTER      [8B]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub docs: (usize, usize),
    pub vocabulary: (usize, usize),
    pub postings: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    pub fn from_header(h: &DocseekHeader) -> Self {
        let mut pos = DocseekHeader::SIZE;

        let docs_start = pos;
        pos += h.docs_len as usize;
        let docs_end = pos;

        let vocab_start = pos;
        pos += h.vocab_len as usize;
        let vocab_end = pos;

        let postings_start = pos;
        pos += h.postings_len as usize;
        let postings_end = pos;

        Self {
            docs: (docs_start, docs_end),
            vocabulary: (vocab_start, vocab_end),
            postings: (postings_start, postings_end),
            footer: (pos, pos + DocseekFooter::SIZE),
        }
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocseekFooter {
    /// CRC32 of header + all sections (everything before the footer)
    pub crc32: u32,
}

impl DocseekFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.crc32.to_le_bytes());
        buf.extend_from_slice(&FOOTER_MAGIC);
    }

    /// Read the footer from the last 8 bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::TooSmall {
                size: bytes.len(),
                min: Self::SIZE,
            });
        }

        let start = bytes.len() - Self::SIZE;
        let tail = &bytes[start..];

        let magic = [tail[4], tail[5], tail[6], tail[7]];
        if magic != FOOTER_MAGIC {
            return Err(FormatError::BadMagic {
                expected: FOOTER_MAGIC,
                found: magic,
            });
        }

        Ok(Self {
            crc32: u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]),
        })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
