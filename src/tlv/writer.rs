//! In-place TLV append.

use byteorder::{BigEndian, ByteOrder};
use tracing::debug;

use super::{encode_tag, TagValue, TAG_ID_MAX, TLV_HEADER_LEN};
use crate::header::{self, PduHeader};
use crate::{ProtocolError, Result};

/// Append one TLV record to the PDU in `buf`.
///
/// `buf` is the whole PDU buffer and its length is the total capacity. The
/// record lands at the current end of the payload and the header's payload
/// size is bumped on success. Every check runs before a single byte is
/// written, so a failed call leaves the PDU untouched; [`ProtocolError::BufferFull`]
/// in particular is recoverable (flush the PDU, reset, retry).
pub fn put(buf: &mut [u8], tag_id: u16, value: TagValue<'_>) -> Result<()> {
    if tag_id > TAG_ID_MAX {
        return Err(ProtocolError::InvalidArgument("tag id exceeds 12 bits"));
    }
    let wire_len = value.wire_len();
    if wire_len > u16::MAX as usize {
        return Err(ProtocolError::InvalidArgument(
            "value longer than the 16-bit length field",
        ));
    }

    let payload_size = header::header_ref(buf)?.payload_size.get() as usize;
    let free = buf
        .len()
        .checked_sub(PduHeader::SIZE + payload_size)
        .ok_or(ProtocolError::MalformedPdu {
            offset: 0,
            reason: "payload size exceeds the buffer",
        })?;

    let need = TLV_HEADER_LEN + wire_len;
    if need > free {
        debug!(
            "no room for tag {} ({} bytes needed, {} free)",
            tag_id, need, free
        );
        return Err(ProtocolError::BufferFull { need, free });
    }

    let start = PduHeader::SIZE + payload_size;
    let record = &mut buf[start..start + need];
    BigEndian::write_u16(&mut record[..2], encode_tag(value.tag_type(), tag_id));
    BigEndian::write_u16(&mut record[2..TLV_HEADER_LEN], wire_len as u16);
    write_value(&mut record[TLV_HEADER_LEN..], value);

    // The append is complete; bump the payload size last.
    header::header_mut(buf)?
        .payload_size
        .set((payload_size + need) as u32);
    Ok(())
}

fn write_value(out: &mut [u8], value: TagValue<'_>) {
    match value {
        TagValue::Block(bytes) => out.copy_from_slice(bytes),
        TagValue::Word(v) => BigEndian::write_u16(out, v),
        TagValue::Longword(v) => BigEndian::write_u32(out, v),
        TagValue::Qword(v) => BigEndian::write_u64(out, v),
        TagValue::Uuid(v) => out.copy_from_slice(&v),
    }
}
