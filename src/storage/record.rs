//! On-disk record framing
//!
//! ```text
//! +------------------+
//! | Magic            | (4 bytes, "KDB1")
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 of payload)
//! +------------------+
//! | Payload Length   | (u64 LE)
//! +------------------+
//! | Payload          | (length bytes)
//! +------------------+
//! ```

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StorageError, StorageResult};

const MAGIC: &[u8; 4] = b"KDB1";
const HEADER_LEN: usize = 4 + 4 + 8;

/// Frames a payload for writing
pub fn encode_record(payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&compute_checksum(payload).to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Unframes a record read from disk.
///
/// Structural problems are always reported; the checksum is only compared
/// when `verify` is set.
pub fn decode_record(key: &str, bytes: &[u8], verify: bool) -> StorageResult<Vec<u8>> {
    let corrupted = |reason: &str| StorageError::Corrupted {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if bytes.len() < HEADER_LEN {
        return Err(corrupted("truncated header"));
    }
    let (header, payload) = bytes.split_at(HEADER_LEN);
    if &header[0..4] != MAGIC {
        return Err(corrupted("bad magic"));
    }

    let mut checksum = [0u8; 4];
    checksum.copy_from_slice(&header[4..8]);
    let mut length = [0u8; 8];
    length.copy_from_slice(&header[8..16]);

    if u64::from_le_bytes(length) != payload.len() as u64 {
        return Err(corrupted("length mismatch"));
    }
    if verify && !verify_checksum(payload, u32::from_le_bytes(checksum)) {
        return Err(StorageError::ChecksumMismatch(key.to_string()));
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_framed_payload() {
        let bytes = encode_record(b"payload");
        assert_eq!(decode_record("k", &bytes, true).unwrap(), b"payload".to_vec());
    }

    #[test]
    fn test_flipped_payload_bit() {
        let mut bytes = encode_record(b"payload");
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        assert_eq!(
            decode_record("k", &bytes, true),
            Err(StorageError::ChecksumMismatch("k".into()))
        );
        assert!(decode_record("k", &bytes, false).is_ok());
    }

    #[test]
    fn test_truncated_record() {
        let bytes = encode_record(b"payload");
        assert!(matches!(
            decode_record("k", &bytes[..bytes.len() - 2], false),
            Err(StorageError::Corrupted { .. })
        ));
        assert!(matches!(
            decode_record("k", &bytes[..3], true),
            Err(StorageError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = encode_record(b"");
        bytes[0] = b'X';
        assert!(matches!(
            decode_record("k", &bytes, true),
            Err(StorageError::Corrupted { .. })
        ));
    }
}
