//! CRC-32 over chunk type and payload.
//!
//! This is the standard reflected CRC-32 (polynomial `0xEDB88320`) that every
//! conforming PNG reader checks, computed by `crc32fast`.

use crate::chunk::{Chunk, ChunkType};
use crate::error::{Error, Result};

/// Computes CRC-32 over a byte range.
#[inline]
pub fn crc32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// Computes the CRC a chunk of type `ty` carrying `payload` must declare.
pub fn chunk_crc(ty: ChunkType, payload: &[u8]) -> u32 {
    chunk_crc_parts(ty, &[payload])
}

/// Same as [`chunk_crc`] for a payload split across several slices, so text
/// chunks can be checksummed without first joining key and value.
pub(crate) fn chunk_crc_parts(ty: ChunkType, parts: &[&[u8]]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(ty.as_bytes());
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

/// Verifies the CRC trailer of a decoded chunk. Returns `Ok(())` if it matches.
pub fn verify(chunk: &Chunk<'_>) -> Result<()> {
    let calculated = chunk_crc(chunk.ty(), chunk.payload());
    if calculated == chunk.declared_crc() {
        Ok(())
    } else {
        log::warn!(
            "crc mismatch in {} chunk at offset {}",
            chunk.ty(),
            chunk.offset()
        );
        Err(Error::crc_mismatch(
            chunk.ty(),
            chunk.offset(),
            chunk.declared_crc(),
            calculated,
        ))
    }
}
