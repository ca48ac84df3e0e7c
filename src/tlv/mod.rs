//! TLV record model: tag packing, value types and the record codec.
//!
//! Every attribute travels as a 4-byte record header followed by its value:
//!
//! ```text
//! 0                    16                  32
//! +---------+-----------+-------------------+
//! | type    | id        | length            |
//! | 4 bits  | 12 bits   | 16 bits           |
//! +---------+-----------+-------------------+
//! | value, `length` octets, no padding      |
//! +-----------------------------------------+
//! ```

pub mod parser;
pub mod writer;

pub use parser::{get, lookup, records, Cursor, RawValue, Record, Records};
pub use writer::put;

use num_enum::TryFromPrimitive;

/// Size of the fixed part of a TLV record (tag word + length field).
pub const TLV_HEADER_LEN: usize = 4;

/// Highest encodable tag id (12 bits on the wire).
pub const TAG_ID_MAX: u16 = 0x0fff;

const TAG_TYPE_SHIFT: u16 = 12;

/// Value type carried in the high nibble of the tag word.
///
/// Codes 1-2, 6-7 and 9-15 are reserved; decoders fall back to
/// [`TagType::Block`] for them.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum TagType {
    /// Arbitrary byte run, carried verbatim.
    Block = 0,
    /// 16-bit unsigned integer, big-endian on the wire.
    Word = 3,
    /// 32-bit unsigned integer, big-endian on the wire.
    Longword = 4,
    /// 64-bit unsigned integer, big-endian on the wire.
    Qword = 5,
    /// 16-byte opaque identifier.
    Uuid = 8,
}

impl TagType {
    /// Map an on-wire type code to a `TagType`, treating reserved codes as
    /// [`TagType::Block`].
    pub fn from_wire(code: u8) -> Self {
        Self::try_from(code).unwrap_or(Self::Block)
    }
}

/// Pack a value type and tag id into the 16-bit tag word (host order; the
/// byte-order conversion happens at the buffer boundary).
#[inline]
pub fn encode_tag(tag_type: TagType, tag_id: u16) -> u16 {
    ((tag_type as u16) << TAG_TYPE_SHIFT) | (tag_id & TAG_ID_MAX)
}

/// Split a host-order tag word into its raw type code and tag id.
#[inline]
pub fn decode_tag(tag_word: u16) -> (u8, u16) {
    ((tag_word >> TAG_TYPE_SHIFT) as u8, tag_word & TAG_ID_MAX)
}

/// A typed attribute value, as passed to [`put`] or returned by [`get`].
///
/// Fixed-width integers carry their own wire width, so no explicit length
/// accompanies them; `Block` borrows the caller's bytes verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagValue<'a> {
    Block(&'a [u8]),
    Word(u16),
    Longword(u32),
    Qword(u64),
    Uuid([u8; 16]),
}

impl<'a> TagValue<'a> {
    /// Build a [`TagValue::Uuid`] from an arbitrary byte run: shorter input
    /// is zero-padded to 16 bytes, longer input truncated to the first 16.
    pub fn uuid_from_slice(src: &[u8]) -> TagValue<'static> {
        let mut uuid = [0u8; 16];
        let n = src.len().min(uuid.len());
        uuid[..n].copy_from_slice(&src[..n]);
        TagValue::Uuid(uuid)
    }

    /// The value type stamped into the tag word.
    pub fn tag_type(&self) -> TagType {
        match self {
            TagValue::Block(_) => TagType::Block,
            TagValue::Word(_) => TagType::Word,
            TagValue::Longword(_) => TagType::Longword,
            TagValue::Qword(_) => TagType::Qword,
            TagValue::Uuid(_) => TagType::Uuid,
        }
    }

    /// Byte count this value occupies on the wire.
    pub fn wire_len(&self) -> usize {
        match self {
            TagValue::Block(bytes) => bytes.len(),
            TagValue::Word(_) => 2,
            TagValue::Longword(_) => 4,
            TagValue::Qword(_) => 8,
            TagValue::Uuid(_) => 16,
        }
    }
}
