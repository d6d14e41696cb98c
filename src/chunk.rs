//! The chunk model shared by every reader and writer.
//!
//! Wire layout of one chunk: `[4-byte BE length | 4-byte type | payload | 4-byte BE CRC]`,
//! where the length counts payload bytes only and the CRC covers `type || payload`.

use std::fmt;

/// The fixed 8-byte PNG signature that opens every stream.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Length of the signature, and so the offset of the first chunk.
pub const SIGNATURE_LEN: usize = SIGNATURE.len();

/// Bytes a chunk occupies on the wire beyond its payload (length, type, CRC).
pub const CHUNK_OVERHEAD: usize = 12;

/// A 4-byte ASCII chunk type tag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);

#[allow(non_upper_case_globals)]
impl ChunkType {
    /// Terminal marker.
    pub const IEND: Self = Self(*b"IEND");
    /// Textual key/value metadata carrier.
    pub const tEXt: Self = Self(*b"tEXt");

    /// The raw tag bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Returns `true` for the terminal marker tag.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        *self == Self::IEND
    }

    /// Returns `true` for the metadata carrier tag.
    #[inline]
    pub fn is_text(&self) -> bool {
        *self == Self::tEXt
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One chunk decoded in place from a source buffer.
///
/// Nothing is copied; `raw` is the full on-wire slice (length field through CRC)
/// and `payload` is the slice between the type tag and the CRC trailer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub(crate) ty: ChunkType,
    pub(crate) payload: &'a [u8],
    pub(crate) declared_crc: u32,
    pub(crate) offset: usize,
    pub(crate) raw: &'a [u8],
}

impl<'a> Chunk<'a> {
    #[inline]
    pub fn ty(&self) -> ChunkType {
        self.ty
    }

    #[inline]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// The CRC stored in the chunk trailer.
    #[inline]
    pub fn declared_crc(&self) -> u32 {
        self.declared_crc
    }

    /// Byte offset of the chunk's length field within the source buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The full on-wire bytes, suitable for verbatim copying.
    #[inline]
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Offset of the chunk that follows this one.
    #[inline]
    pub fn next_offset(&self) -> usize {
        self.offset + self.raw.len()
    }

    /// Returns `true` if this chunk is copied through untouched by the writers.
    #[inline]
    pub fn is_passthrough(&self) -> bool {
        !self.ty.is_text() && !self.ty.is_terminal()
    }
}

impl fmt::Debug for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("ty", &self.ty)
            .field("offset", &self.offset)
            .field(
                "payload",
                &(&self.payload[..self.payload.len().min(12)], self.payload.len()),
            )
            .field("declared_crc", &self.declared_crc)
            .finish()
    }
}

/// Appends one correctly checksummed chunk.
#[cfg(test)]
pub(crate) fn push_chunk(out: &mut Vec<u8>, ty: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(ty);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crate::checksum::chunk_crc(ChunkType(*ty), payload).to_be_bytes());
}
