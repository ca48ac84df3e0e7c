//! PDU header layout and the header-level operations.
//!
//! The header is identical for requests and responses; only the meaning of
//! the command/status register changes with direction.

use zerocopy::byteorder::{BigEndian, U32};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Ref, Unaligned};

use crate::{ProtocolError, Result};

/// Width of the magic (signature) field in bytes.
pub const MAGIC_LEN: usize = 8;

/// PDU header (20 bytes on the wire).
///
/// ```text
/// +-----------+-----------+-----------+-----------+
/// | magic     | payload   | csr       | sequence  |
/// | 8 octets  | 4 octets  | 4 octets  | 4 octets  |
/// +-----------+-----------+-----------+-----------+
/// ```
///
/// All integer fields are big-endian on the wire. `payload_size` counts only
/// the TLV run following the header and is the single source of truth for
/// where the payload ends; there is no terminating record.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct PduHeader {
    pub magic: [u8; MAGIC_LEN],
    pub payload_size: U32<BigEndian>,
    pub command_status: U32<BigEndian>,
    pub sequence: U32<BigEndian>,
}

impl PduHeader {
    /// Header size in bytes.
    pub const SIZE: usize = MAGIC_LEN + 12;
}

/// Host-order header fields returned by [`read_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInfo {
    pub payload_size: u32,
    pub command_status: u32,
    pub sequence: u32,
}

/// Initialize (or reset) the header of the PDU held in `buf`.
///
/// Zero-fills the header region, stamps the signature into the magic field
/// (zero-padded to [`MAGIC_LEN`]; an exactly 8-byte signature fills it with
/// no terminator) and writes `command_status` and `sequence`. The payload
/// size goes back to 0, so any records previously encoded into `buf` are
/// gone as far as the codec is concerned even though their bytes remain.
pub fn init_header(
    buf: &mut [u8],
    signature: &[u8],
    command_status: u32,
    sequence: u32,
) -> Result<()> {
    if signature.len() > MAGIC_LEN {
        return Err(ProtocolError::InvalidArgument(
            "signature longer than the magic field",
        ));
    }
    if buf.len() < PduHeader::SIZE {
        return Err(ProtocolError::InvalidArgument(
            "buffer shorter than a PDU header",
        ));
    }

    let mut magic = [0u8; MAGIC_LEN];
    magic[..signature.len()].copy_from_slice(signature);

    let hdr = header_mut(buf)?;
    *hdr = PduHeader {
        magic,
        payload_size: U32::new(0),
        command_status: U32::new(command_status),
        sequence: U32::new(sequence),
    };
    Ok(())
}

/// Validate the magic field against `expected_signature` and decode the
/// remaining header fields to host order. Side-effect free.
///
/// The comparison covers the signature's length; [`init_header`] zero-pads
/// the field, so peers built with the same signature always match.
pub fn read_header(buf: &[u8], expected_signature: &[u8]) -> Result<HeaderInfo> {
    if expected_signature.len() > MAGIC_LEN {
        return Err(ProtocolError::MalformedPdu {
            offset: 0,
            reason: "signature longer than the magic field",
        });
    }
    let hdr = header_ref(buf)?;
    if hdr.magic[..expected_signature.len()] != *expected_signature {
        return Err(ProtocolError::MalformedPdu {
            offset: 0,
            reason: "magic mismatch",
        });
    }
    Ok(HeaderInfo {
        payload_size: hdr.payload_size.get(),
        command_status: hdr.command_status.get(),
        sequence: hdr.sequence.get(),
    })
}

/// Borrow the header in place.
pub(crate) fn header_ref(buf: &[u8]) -> Result<&PduHeader> {
    let (hdr, _) =
        Ref::<_, PduHeader>::new_from_prefix(buf).ok_or(ProtocolError::MalformedPdu {
            offset: 0,
            reason: "buffer shorter than a PDU header",
        })?;
    Ok(hdr.into_ref())
}

/// Borrow the header in place, mutably.
pub(crate) fn header_mut(buf: &mut [u8]) -> Result<&mut PduHeader> {
    let (hdr, _) =
        Ref::<_, PduHeader>::new_from_prefix(buf).ok_or(ProtocolError::MalformedPdu {
            offset: 0,
            reason: "buffer shorter than a PDU header",
        })?;
    Ok(hdr.into_mut())
}

/// Borrow the payload region, exactly `payload_size` bytes past the header.
pub(crate) fn payload(buf: &[u8]) -> Result<&[u8]> {
    let size = header_ref(buf)?.payload_size.get() as usize;
    buf.get(PduHeader::SIZE..PduHeader::SIZE + size)
        .ok_or(ProtocolError::MalformedPdu {
            offset: 0,
            reason: "payload size exceeds the buffer",
        })
}
