//! One-PDU framing over byte streams.
//!
//! The codec itself performs no I/O; these helpers implement the read-exact
//! and write-exact boundary a transport needs. The header goes first and its
//! payload size says exactly how many bytes follow, so a reader never has to
//! guess at message boundaries.

use std::io::{Read, Write};

use tracing::debug;

use crate::header::{read_header, PduHeader};
use crate::{ProtocolError, Result};

/// Receive one PDU into `buf`, returning its total size in bytes.
///
/// Reads exactly one header, validates it against `expected_signature`, then
/// reads exactly the payload it declares. `buf` must be able to hold the
/// whole PDU; a short stream surfaces as [`ProtocolError::Io`] with
/// `UnexpectedEof`.
pub fn read_pdu<R: Read>(reader: &mut R, buf: &mut [u8], expected_signature: &[u8]) -> Result<usize> {
    if buf.len() < PduHeader::SIZE {
        return Err(ProtocolError::BufferTooSmall {
            need: PduHeader::SIZE,
            got: buf.len(),
        });
    }
    reader.read_exact(&mut buf[..PduHeader::SIZE])?;
    let info = read_header(buf, expected_signature)?;

    let total = PduHeader::SIZE + info.payload_size as usize;
    if buf.len() < total {
        return Err(ProtocolError::BufferTooSmall {
            need: total,
            got: buf.len(),
        });
    }
    reader.read_exact(&mut buf[PduHeader::SIZE..total])?;
    debug!(
        "received PDU [len={} csr={:#010x} seq={}]",
        info.payload_size, info.command_status, info.sequence
    );
    Ok(total)
}

/// Transmit the PDU in `buf`, returning the byte count written.
///
/// The local header is validated first, so a buffer that was never
/// initialized (or was built for another protocol family) is refused before
/// anything reaches the wire. Only the occupied prefix of `buf` is sent.
pub fn write_pdu<W: Write>(writer: &mut W, buf: &[u8], expected_signature: &[u8]) -> Result<usize> {
    let info = read_header(buf, expected_signature)?;
    let total = PduHeader::SIZE + info.payload_size as usize;
    if buf.len() < total {
        return Err(ProtocolError::MalformedPdu {
            offset: 0,
            reason: "payload size exceeds the buffer",
        });
    }
    writer.write_all(&buf[..total])?;
    Ok(total)
}
