//! Strips every `tEXt` chunk from a stream.

use crate::chunk::SIGNATURE_LEN;
use crate::cursor::{ChunkCursor, MISSING_TERMINAL, SHORT_SIGNATURE};
use crate::error::{Error, Result};

/// Returns a copy of `bytes` with all text chunks removed.
///
/// The signature, every other chunk (with its original CRC) and the original
/// `IEND` chunk are copied verbatim, followed by any bytes that trail `IEND`.
/// Trimming an already trimmed stream returns identical bytes.
pub fn trim(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() < SIGNATURE_LEN {
        return Err(Error::malformed(SIGNATURE_LEN, SHORT_SIGNATURE));
    }
    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&bytes[..SIGNATURE_LEN]);

    let mut cursor = ChunkCursor::new(bytes);
    let mut dropped = 0usize;
    for chunk in cursor.by_ref() {
        let chunk = chunk?;
        if chunk.is_passthrough() {
            out.extend_from_slice(chunk.raw());
        } else if chunk.ty().is_text() {
            dropped += 1;
        }
    }

    // The cursor only finishes without error once it has decoded IEND.
    let terminal = cursor.terminal_offset().ok_or_else(|| {
        Error::malformed(cursor.position(), MISSING_TERMINAL)
    })?;
    out.extend_from_slice(&bytes[terminal..]);

    log::debug!("trim dropped {dropped} tEXt chunk(s)");
    Ok(out)
}
