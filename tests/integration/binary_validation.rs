//! Binary validation against hostile or damaged files.

use crate::common::sample_index;
use docseek::binary::{
    deserialize, read_layout, serialize, DocseekFooter, DocseekHeader, MAGIC, MAX_FILE_SIZE,
};
use docseek::{decode_index, FormatError, LoadError};

/// Recompute the CRC after editing `bytes`, so later checks are reached.
fn reseal(bytes: &mut [u8]) {
    let content_len = bytes.len() - DocseekFooter::SIZE;
    let crc = DocseekFooter::compute_crc32(&bytes[..content_len]);
    bytes[content_len..content_len + 4].copy_from_slice(&crc.to_le_bytes());
}

#[test]
fn test_valid_file_layout() {
    let bytes = serialize(&sample_index()).unwrap();
    let layout = read_layout(&bytes).unwrap();

    assert!(layout.checksum_ok());
    assert_eq!(layout.header.doc_count, 5);
    assert_eq!(layout.offsets.total_size(), bytes.len());
    assert_eq!(layout.offsets.docs.0, DocseekHeader::SIZE);
    assert_eq!(layout.offsets.footer.1, bytes.len());
}

#[test]
fn test_wrong_magic() {
    let mut bytes = serialize(&sample_index()).unwrap();
    bytes[..4].copy_from_slice(b"SRCH");
    reseal(&mut bytes);
    match deserialize(&bytes) {
        Err(FormatError::BadMagic { expected, found }) => {
            assert_eq!(expected, MAGIC);
            assert_eq!(&found, b"SRCH");
        }
        other => panic!("expected BadMagic, got {:?}", other),
    }
}

#[test]
fn test_future_version_rejected() {
    let mut bytes = serialize(&sample_index()).unwrap();
    bytes[4] = 99;
    reseal(&mut bytes);
    assert!(matches!(
        deserialize(&bytes),
        Err(FormatError::UnsupportedVersion { found: 99, .. })
    ));
}

#[test]
fn test_checksum_mismatch() {
    let mut bytes = serialize(&sample_index()).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    assert!(matches!(
        deserialize(&bytes),
        Err(FormatError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_section_length_lies() {
    let mut bytes = serialize(&sample_index()).unwrap();
    // docs_len lives at offset 24.
    let docs_len = u32::from_le_bytes(bytes[24..28].try_into().unwrap());
    bytes[24..28].copy_from_slice(&(docs_len + 1).to_le_bytes());
    reseal(&mut bytes);
    assert!(deserialize(&bytes).is_err());
}

#[test]
fn test_negative_avg_dl_rejected() {
    let mut bytes = serialize(&sample_index()).unwrap();
    bytes[16..24].copy_from_slice(&(-1.0f64).to_bits().to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(deserialize(&bytes), Err(FormatError::InvalidData(_))));
}

#[test]
fn test_nan_avg_dl_rejected() {
    let mut bytes = serialize(&sample_index()).unwrap();
    bytes[16..24].copy_from_slice(&f64::NAN.to_bits().to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(deserialize(&bytes), Err(FormatError::InvalidData(_))));
}

#[test]
fn test_oversized_file_rejected() {
    let bytes = vec![0u8; MAX_FILE_SIZE + 1];
    assert!(matches!(
        deserialize(&bytes),
        Err(FormatError::TooLarge { .. })
    ));
}

#[test]
fn test_empty_and_tiny_inputs() {
    assert!(matches!(deserialize(&[]), Err(FormatError::TooSmall { .. })));
    assert!(matches!(deserialize(&MAGIC), Err(FormatError::TooSmall { .. })));
}

#[test]
fn test_decode_index_reports_format_errors() {
    let mut bytes = serialize(&sample_index()).unwrap();
    bytes.truncate(bytes.len() - 1);
    assert!(matches!(decode_index(&bytes), Err(LoadError::Format(_))));
}
