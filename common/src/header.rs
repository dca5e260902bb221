/*++

Licensed under the Apache-2.0 license.

File Name:

    header.rs

Abstract:

    File contains the operation header codec. The header prefixes every
    application operation exchanged over an assigned channel; the trust and
    link layers agree on this layout, the dispatch layer consumes it.

--*/

use bridgerom_error::{BridgeError, BridgeResult};

/// Encoded size of an [`OperationHeader`] in bytes.
pub const OPERATION_HEADER_SIZE: usize = 8;

/// Type-field bit distinguishing a response from a request.
pub const RESPONSE_FLAG: u8 = 0x80;

/// Operation completed successfully.
pub const STATUS_SUCCESS: u8 = 0x00;

/// Operation request was malformed.
pub const STATUS_INVALID: u8 = 0x06;

/// Operation failed for an unspecified reason.
pub const STATUS_UNKNOWN_ERROR: u8 = 0xFE;

/// Largest operation payload: a 2 KiB channel buffer less one request and
/// one response header.
pub const MAX_PAYLOAD_SIZE: usize = 0x800 - 2 * OPERATION_HEADER_SIZE;

/// Fixed-layout operation header.
///
/// Wire layout, little-endian, byte-exact:
///
/// | offset | width | field     |
/// |--------|-------|-----------|
/// | 0      | 2     | `size`    |
/// | 2      | 2     | `id`      |
/// | 4      | 1     | `op_type` |
/// | 5      | 1     | `status`  |
/// | 6      | 2     | `pad`     |
///
/// `size` covers the header itself plus the payload. The layout is encoded
/// and decoded field by field; it is never transmuted from memory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperationHeader {
    /// Total operation size in bytes, header included.
    pub size: u16,
    /// Requester-chosen id echoed by the response.
    pub id: u16,
    /// Operation type; responses set [`RESPONSE_FLAG`].
    pub op_type: u8,
    /// Completion status; zero in requests.
    pub status: u8,
    /// Reserved, transmitted as written.
    pub pad: u16,
}

impl OperationHeader {
    /// Encode into the fixed 8-byte wire layout.
    pub fn encode(&self) -> [u8; OPERATION_HEADER_SIZE] {
        let mut buf = [0u8; OPERATION_HEADER_SIZE];
        buf[0..2].copy_from_slice(&self.size.to_le_bytes());
        buf[2..4].copy_from_slice(&self.id.to_le_bytes());
        buf[4] = self.op_type;
        buf[5] = self.status;
        buf[6..8].copy_from_slice(&self.pad.to_le_bytes());
        buf
    }

    /// Decode from a buffer holding at least one encoded header.
    pub fn decode(buf: &[u8]) -> BridgeResult<Self> {
        if buf.len() < OPERATION_HEADER_SIZE {
            return Err(BridgeError::InvalidArgument);
        }
        Ok(Self {
            size: u16::from_le_bytes([buf[0], buf[1]]),
            id: u16::from_le_bytes([buf[2], buf[3]]),
            op_type: buf[4],
            status: buf[5],
            pad: u16::from_le_bytes([buf[6], buf[7]]),
        })
    }

    /// Length of the request payload following the header.
    ///
    /// A `size` smaller than the header itself yields zero.
    pub fn request_payload_len(&self) -> u16 {
        self.size.saturating_sub(OPERATION_HEADER_SIZE as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let hdr = OperationHeader {
            size: 0x0010,
            id: 0x0203,
            op_type: 0x05,
            status: STATUS_SUCCESS,
            pad: 0,
        };
        assert_eq!(
            hdr.encode(),
            [0x10, 0x00, 0x03, 0x02, 0x05, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_decode_round_trip() {
        let hdr = OperationHeader {
            size: 0x0123,
            id: 0xBEEF,
            op_type: 0x02 | RESPONSE_FLAG,
            status: STATUS_INVALID,
            pad: 0xA55A,
        };
        let decoded = OperationHeader::decode(&hdr.encode()).unwrap();
        assert_eq!(decoded, hdr);
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let buf = [0u8; OPERATION_HEADER_SIZE - 1];
        assert_eq!(
            OperationHeader::decode(&buf),
            Err(BridgeError::InvalidArgument)
        );
    }

    #[test]
    fn test_decode_ignores_trailing_payload() {
        let mut buf = [0u8; 16];
        buf[0] = 0x10;
        let hdr = OperationHeader::decode(&buf).unwrap();
        assert_eq!(hdr.size, 0x10);
        assert_eq!(hdr.request_payload_len(), 8);
    }

    #[test]
    fn test_payload_len_saturates() {
        let hdr = OperationHeader {
            size: 4,
            ..Default::default()
        };
        assert_eq!(hdr.request_payload_len(), 0);
    }
}
