//! AVP (Attribute/Value Pair) message protocol.
//!
//! A PDU is a caller-owned, fixed-capacity buffer holding a 20-byte header
//! (signature, payload size, command/status register, sequence number)
//! followed by a packed run of self-describing TLV records:
//!
//! ```text
//!          |<- payload (header.payload_size) ->|
//! +--------+-------+-------+--    ...   -------+
//! | header | TLV 0 | TLV 1 |            TLV N  |
//! +--------+-------+-------+--    ...   -------+
//! ```
//!
//! The codec encodes and decodes records in place: no allocation, every
//! access bounds-checked, all multi-byte integers big-endian on the wire.
//! Scans resume through an explicit [`Cursor`], so repeated attributes are
//! retrieved with consecutive calls.
//!
//! ```
//! use avp_protocol::{init_header, put, get, Cursor, TagValue};
//!
//! let mut buf = [0u8; 256];
//! init_header(&mut buf, b"Z0magic", 1, 17).unwrap();
//! put(&mut buf, 5, TagValue::Longword(0x1234_abcd)).unwrap();
//!
//! let mut cursor = Cursor::start();
//! let mut scratch = [0u8; 64];
//! let value = get(&buf, &mut cursor, 5, &mut scratch).unwrap();
//! assert_eq!(value, TagValue::Longword(0x1234_abcd));
//! ```

use thiserror::Error;

pub mod dump;
pub mod framing;
pub mod header;
pub mod tlv;

pub use dump::dump;
pub use framing::{read_pdu, write_pdu};
pub use header::{init_header, read_header, HeaderInfo, PduHeader, MAGIC_LEN};
pub use tlv::{
    decode_tag, encode_tag, get, lookup, put, records, Cursor, RawValue, Record, Records, TagType,
    TagValue, TAG_ID_MAX, TLV_HEADER_LEN,
};

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Caller input that can never encode: oversized signature, tag id past
    /// 12 bits, block past the 16-bit length field. Nothing was written.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The buffer does not hold a well-formed PDU: short or mismatched
    /// header, or a record whose declared length overruns the payload.
    /// `offset` is relative to the start of the payload.
    #[error("malformed PDU at offset {offset}: {reason}")]
    MalformedPdu { offset: usize, reason: &'static str },

    /// Not enough free capacity left to append the record. Recoverable; the
    /// PDU is unchanged and can be flushed and reset.
    #[error("PDU full: record needs {need} bytes, {free} free")]
    BufferFull { need: usize, free: usize },

    /// Destination buffer shorter than the value on the wire. Recoverable.
    #[error("destination buffer too small: need {need} bytes, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    /// No record with the requested tag id between the cursor and the end of
    /// the payload. An expected outcome when probing optional attributes.
    #[error("tag id {tag_id} not found")]
    NotFound { tag_id: u16 },

    /// Transport failure while framing a PDU.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
