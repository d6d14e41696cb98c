//! The single chunk walker every operation is built on.
//!
//! [`ChunkCursor`] walks a buffer in place. `ReadCursor` walks a source that
//! arrives through `io::Read`; both decode headers with [`ChunkHeader`] and
//! report a malformed stream with the same offsets and messages.

use std::io::{self, Read, Write};

use crate::checksum;
use crate::chunk::{Chunk, ChunkType, CHUNK_OVERHEAD, SIGNATURE_LEN};
use crate::error::{Error, Result};

pub(crate) const SHORT_SIGNATURE: &str = "stream is shorter than the signature";
pub(crate) const MISSING_TERMINAL: &str = "stream ended before the IEND chunk";
pub(crate) const TRUNCATED_HEADER: &str = "truncated chunk header";
pub(crate) const LENGTH_PAST_END: &str = "chunk length runs past the end of the stream";

/// Length field plus type tag.
pub(crate) const HEADER_LEN: usize = 8;

/// Length and type of one chunk, decoded from its first 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkHeader {
    pub(crate) raw: [u8; HEADER_LEN],
    pub(crate) len: u32,
    pub(crate) ty: ChunkType,
    pub(crate) offset: usize,
}

impl ChunkHeader {
    pub(crate) fn decode(raw: [u8; HEADER_LEN], offset: usize) -> Self {
        Self {
            raw,
            len: u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]),
            ty: ChunkType([raw[4], raw[5], raw[6], raw[7]]),
            offset,
        }
    }

    /// Bytes the whole chunk occupies on the wire.
    pub(crate) fn wire_len(&self) -> Result<usize> {
        usize::try_from(self.len)
            .ok()
            .and_then(|len| len.checked_add(CHUNK_OVERHEAD))
            .ok_or_else(|| Error::malformed(self.offset, LENGTH_PAST_END))
    }

    pub(crate) fn is_passthrough(&self) -> bool {
        !self.ty.is_text() && !self.ty.is_terminal()
    }
}

/// Walks a chunked buffer one chunk at a time, starting right after the signature.
///
/// The cursor yields every chunk up to and including the `IEND` chunk, then
/// stops. Running off the end of the buffer before `IEND`, or a chunk whose
/// declared length reaches past the buffer, yields one `Error::Malformed` and
/// ends the walk. With CRC checking enabled every chunk (the terminal one
/// included) is verified before it is yielded, and the first mismatch ends the
/// walk with `Error::CrcMismatch`.
///
/// The cursor never copies: each [`Chunk`] borrows from the source buffer.
#[derive(Debug, Clone)]
pub struct ChunkCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    check_crc: bool,
    terminal: Option<usize>,
    done: bool,
}

impl<'a> ChunkCursor<'a> {
    /// Creates a cursor over a full stream; the 8-byte signature is skipped unread.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: SIGNATURE_LEN,
            check_crc: false,
            terminal: None,
            done: false,
        }
    }

    /// Enables or disables CRC verification of each chunk.
    pub fn with_crc_check(mut self, check_crc: bool) -> Self {
        self.check_crc = check_crc;
        self
    }

    /// Offset of the next chunk to be decoded.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Offset of the `IEND` chunk, once the cursor has reached it.
    #[inline]
    pub fn terminal_offset(&self) -> Option<usize> {
        self.terminal
    }

    fn fail(&mut self, message: &str) -> Option<Result<Chunk<'a>>> {
        self.done = true;
        Some(Err(Error::malformed(self.pos, message)))
    }
}

impl<'a> Iterator for ChunkCursor<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.bytes.len() < SIGNATURE_LEN {
            return self.fail(SHORT_SIGNATURE);
        }
        if self.pos >= self.bytes.len() {
            return self.fail(MISSING_TERMINAL);
        }

        let bytes = self.bytes;
        let rest = &bytes[self.pos..];
        if rest.len() < HEADER_LEN {
            return self.fail(TRUNCATED_HEADER);
        }
        let mut raw = [0u8; HEADER_LEN];
        raw.copy_from_slice(&rest[..HEADER_LEN]);
        let header = ChunkHeader::decode(raw, self.pos);
        let wire_len = match header.wire_len() {
            Ok(n) if n <= rest.len() => n,
            _ => return self.fail(LENGTH_PAST_END),
        };

        let crc_at = wire_len - 4;
        let declared_crc = u32::from_be_bytes([
            rest[crc_at],
            rest[crc_at + 1],
            rest[crc_at + 2],
            rest[crc_at + 3],
        ]);
        let chunk = Chunk {
            ty: header.ty,
            payload: &rest[HEADER_LEN..crc_at],
            declared_crc,
            offset: self.pos,
            raw: &rest[..wire_len],
        };
        log::trace!("chunk {} len={} at offset {}", header.ty, header.len, self.pos);

        if self.check_crc {
            if let Err(e) = checksum::verify(&chunk) {
                self.done = true;
                return Some(Err(e));
            }
        }

        if header.ty.is_terminal() {
            self.terminal = Some(self.pos);
            self.done = true;
        }
        self.pos += wire_len;
        Some(Ok(chunk))
    }
}

impl std::iter::FusedIterator for ChunkCursor<'_> {}

/// Walks a source read through `io::Read`, one header at a time.
///
/// Only the current header is held in memory; chunk bodies are streamed with
/// [`copy_body`](Self::copy_body). Nothing past the `IEND` chunk is read.
pub(crate) struct ReadCursor<R> {
    source: R,
    pos: usize,
    done: bool,
}

impl<R: Read> ReadCursor<R> {
    pub(crate) fn new(source: R) -> Self {
        Self {
            source,
            pos: SIGNATURE_LEN,
            done: false,
        }
    }

    /// Reads the 8-byte signature. Call once, before the first header.
    pub(crate) fn signature(&mut self) -> Result<[u8; SIGNATURE_LEN]> {
        let mut signature = [0u8; SIGNATURE_LEN];
        if fill(&mut self.source, &mut signature)? < SIGNATURE_LEN {
            return Err(self.fail(SHORT_SIGNATURE));
        }
        Ok(signature)
    }

    /// Reads the next chunk header, or `None` once the `IEND` chunk has been consumed.
    pub(crate) fn next_header(&mut self) -> Result<Option<ChunkHeader>> {
        if self.done {
            return Ok(None);
        }
        let mut raw = [0u8; HEADER_LEN];
        match fill(&mut self.source, &mut raw)? {
            0 => Err(self.fail(MISSING_TERMINAL)),
            n if n < HEADER_LEN => Err(self.fail(TRUNCATED_HEADER)),
            _ => {
                let header = ChunkHeader::decode(raw, self.pos);
                log::trace!("chunk {} len={} at offset {}", header.ty, header.len, self.pos);
                Ok(Some(header))
            }
        }
    }

    /// Streams the payload and CRC of the chunk `header` opens into `out`.
    pub(crate) fn copy_body<W: Write + ?Sized>(
        &mut self,
        header: &ChunkHeader,
        out: &mut W,
    ) -> Result<()> {
        let wire_len = match header.wire_len() {
            Ok(n) => n,
            Err(_) => return Err(self.fail(LENGTH_PAST_END)),
        };
        let body = (wire_len - HEADER_LEN) as u64;
        if io::copy(&mut (&mut self.source).take(body), out)? != body {
            return Err(self.fail(LENGTH_PAST_END));
        }
        self.pos = match self.pos.checked_add(wire_len) {
            Some(pos) => pos,
            None => return Err(self.fail(LENGTH_PAST_END)),
        };
        if header.ty.is_terminal() {
            self.done = true;
        }
        Ok(())
    }

    fn fail(&mut self, message: &str) -> Error {
        self.done = true;
        Error::malformed(self.pos, message)
    }
}

/// Reads until `buf` is full or the source is exhausted; returns the bytes read.
fn fill<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
