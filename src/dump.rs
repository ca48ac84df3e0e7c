//! Human-oriented PDU dump through the `tracing` collaborator.

use byteorder::{BigEndian, ByteOrder};
use tracing::{info, warn};

use crate::header;
use crate::tlv::{records, TLV_HEADER_LEN};

/// Value bytes rendered per record before the hex preview is cut off.
const VALUE_PREVIEW_LEN: usize = 64;

/// Log the header and every TLV record of the PDU in `buf`.
///
/// Purely diagnostic; the PDU is not modified. Malformed input is reported
/// with a warning and the walk stops at the first bad record instead of
/// reading past the declared payload.
pub fn dump(buf: &[u8]) {
    let hdr = match header::header_ref(buf) {
        Ok(hdr) => hdr,
        Err(err) => {
            warn!("not a PDU: {}", err);
            return;
        }
    };
    info!(
        "PDU [len={} csr={:#010x} seq={}]",
        hdr.payload_size.get(),
        hdr.command_status.get(),
        hdr.sequence.get()
    );

    let iter = match records(buf) {
        Ok(iter) => iter,
        Err(err) => {
            warn!("payload not walkable: {}", err);
            return;
        }
    };
    for (index, item) in iter.enumerate() {
        match item {
            Ok(rec) => {
                let mut head = [0u8; TLV_HEADER_LEN];
                BigEndian::write_u16(&mut head[..2], rec.tag_word);
                BigEndian::write_u16(&mut head[2..], rec.value.len() as u16);
                let preview = &rec.value[..rec.value.len().min(VALUE_PREVIEW_LEN)];
                info!(
                    "[{:04}] TLV [tag={:#06x} (id={}, type={}), len={}] 0x{}:0x{}",
                    index,
                    rec.tag_word,
                    rec.tag_id,
                    rec.type_code,
                    rec.value.len(),
                    hex::encode(head),
                    hex::encode(preview)
                );
            }
            Err(err) => {
                warn!("dump stopped at record {}: {}", index, err);
                return;
            }
        }
    }
}
