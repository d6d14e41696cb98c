//! Writers that re-emit a stream with a new set of `tEXt` chunks.
//!
//! Output order is always: signature, every non-text chunk in source order
//! (verbatim, original CRC), one text chunk per entry in iteration order, and a
//! freshly built `IEND` chunk. Text chunks already present in the source are
//! dropped, not merged.
//!
//! Every writer, blocking or async, emits the pieces built here:
//! [`passthrough_pieces`], [`TextPieces`] and [`terminal_chunk`]. Only the call
//! that hands a piece to the sink differs between them. The in-memory
//! ([`write`]) path is [`write_to`] over a `Vec`, so the two produce identical
//! bytes, and [`ChunkWriter`] splits that same emission across explicit calls.

use std::io::{self, Read, Write};

use crate::checksum;
use crate::chunk::{ChunkType, CHUNK_OVERHEAD, SIGNATURE_LEN};
use crate::cursor::{ChunkCursor, ReadCursor};
use crate::error::{Error, Result};
use crate::text;

const SEPARATOR: &[u8] = &[0];

/// Re-emits `source` with `entries` as its text chunks and returns the new stream.
pub fn write<I, K, V>(source: &[u8], entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = Vec::with_capacity(source.len());
    write_to(source, entries, &mut out)?;
    Ok(out)
}

/// Re-emits `source` with `entries` as its text chunks into `sink`.
///
/// Each field is handed to the sink with `write_all` as soon as it is ready; the
/// destination is never assembled in memory. The sink is flushed after the
/// terminal chunk and then dropped. Pass `&mut sink` to keep using it.
///
/// `source` is fully walked before the first byte is written, so a malformed
/// source leaves the sink untouched. Sink errors surface as [`Error::Io`]
/// carrying the sink's own `io::Error`.
pub fn write_to<W, I, K, V>(source: &[u8], entries: I, mut sink: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    write_pieces(&mut sink, &passthrough_pieces(source)?)?;
    let mut count = 0usize;
    for (key, value) in entries {
        write_pieces(&mut sink, &TextPieces::new(key.as_ref(), value.as_ref())?.pieces())?;
        count += 1;
    }
    sink.write_all(&terminal_chunk())?;
    sink.flush()?;
    log::debug!("wrote {count} tEXt chunk(s)");
    Ok(())
}

/// The signature followed by the raw bytes of every non-text, non-terminal
/// chunk of `source`, in write order.
///
/// The whole source is walked before anything is returned, so a malformed
/// source yields an error and no pieces.
pub(crate) fn passthrough_pieces(source: &[u8]) -> Result<Vec<&[u8]>> {
    let mut pieces = vec![&source[..source.len().min(SIGNATURE_LEN)]];
    for chunk in ChunkCursor::new(source) {
        let chunk = chunk?;
        if chunk.is_passthrough() {
            pieces.push(chunk.raw());
        } else if chunk.ty().is_text() {
            log::debug!("dropping existing tEXt chunk at offset {}", chunk.offset());
        }
    }
    Ok(pieces)
}

/// The field writes of one text chunk: header, key, separator, value, CRC.
pub(crate) struct TextPieces<'a> {
    header: [u8; 8],
    key: &'a str,
    value: &'a str,
    crc: [u8; 4],
}

impl<'a> TextPieces<'a> {
    /// Fails with [`Error::TooLarge`] before anything is written if the payload
    /// does not fit the length field.
    pub(crate) fn new(key: &'a str, value: &'a str) -> Result<Self> {
        Ok(Self {
            header: text::header(key, value)?,
            key,
            value,
            crc: text::crc(key, value),
        })
    }

    pub(crate) fn pieces(&self) -> [&[u8]; 5] {
        [
            &self.header,
            self.key.as_bytes(),
            SEPARATOR,
            self.value.as_bytes(),
            &self.crc,
        ]
    }
}

/// The 12-byte `IEND` chunk: zero length, type, CRC of the type alone.
pub(crate) fn terminal_chunk() -> [u8; CHUNK_OVERHEAD] {
    let crc = checksum::chunk_crc(ChunkType::IEND, &[]).to_be_bytes();
    let ty = ChunkType::IEND.0;
    [
        0, 0, 0, 0, ty[0], ty[1], ty[2], ty[3], crc[0], crc[1], crc[2], crc[3],
    ]
}

fn write_pieces<W: Write + ?Sized>(sink: &mut W, pieces: &[&[u8]]) -> Result<()> {
    for piece in pieces {
        sink.write_all(piece)?;
    }
    Ok(())
}

/// Same emission as [`passthrough_pieces`] for a source that arrives through `Read`.
///
/// Chunks are forwarded as they are read: the header piece is written, then
/// the body is streamed through `io::copy`. Text and terminal bodies are read
/// and discarded. Reading stops right after the `IEND` chunk.
fn copy_passthrough_from_reader<R: Read, W: Write>(source: R, sink: &mut W) -> Result<()> {
    let mut cursor = ReadCursor::new(source);
    sink.write_all(&cursor.signature()?)?;
    while let Some(header) = cursor.next_header()? {
        if header.is_passthrough() {
            sink.write_all(&header.raw)?;
            cursor.copy_body(&header, sink)?;
        } else {
            if header.ty.is_text() {
                log::debug!("dropping existing tEXt chunk at offset {}", header.offset);
            }
            cursor.copy_body(&header, &mut io::sink())?;
        }
    }
    Ok(())
}

/// Open/closed state and entry count shared by the blocking and async sessions.
#[derive(Debug, Default)]
pub(crate) struct Session {
    closed: bool,
    entries: usize,
}

impl Session {
    /// Fails with [`Error::SessionClosed`] once the session has been closed.
    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::SessionClosed);
        }
        Ok(())
    }

    pub(crate) fn record_entry(&mut self) {
        self.entries += 1;
    }

    /// Marks the session closed; fails if it already was.
    pub(crate) fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn entries(&self) -> usize {
        self.entries
    }
}

/// An incremental writer session over a sink.
///
/// `open` copies the signature and non-text chunks of the source, each
/// [`write`](Self::write) appends one text chunk, and [`close`](Self::close)
/// appends `IEND` and flushes. The result is byte-identical to [`write_to`]
/// with the same source and the entries in call order.
///
/// ```rust
/// # use pngtext::ChunkWriter;
/// # let png = pngtext::SIGNATURE.iter().copied()
/// #     .chain([0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82])
/// #     .collect::<Vec<u8>>();
/// let mut out = Vec::new();
/// let mut writer = ChunkWriter::open(&png, &mut out)?;
/// writer.write("chara", "{}")?;
/// writer.close()?;
/// assert_eq!(out, pngtext::write(&png, [("chara", "{}")])?);
/// # Ok::<(), pngtext::Error>(())
/// ```
pub struct ChunkWriter<W: Write> {
    sink: W,
    session: Session,
}

impl<W: Write> ChunkWriter<W> {
    /// Starts a session: copies the signature and every non-text chunk of `source`.
    pub fn open(source: &[u8], mut sink: W) -> Result<Self> {
        write_pieces(&mut sink, &passthrough_pieces(source)?)?;
        Ok(Self::opened(sink))
    }

    /// Starts a session from a source read incrementally.
    ///
    /// A malformed source is reported exactly as [`open`](Self::open) reports
    /// it, but chunks are forwarded while the source is still being read, so a
    /// truncated source leaves a partial copy in the sink.
    pub fn open_reader<R: Read>(source: R, mut sink: W) -> Result<Self> {
        copy_passthrough_from_reader(source, &mut sink)?;
        Ok(Self::opened(sink))
    }

    fn opened(sink: W) -> Self {
        Self {
            sink,
            session: Session::default(),
        }
    }

    /// Appends one text chunk.
    pub fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.session.ensure_open()?;
        write_pieces(&mut self.sink, &TextPieces::new(key, value)?.pieces())?;
        self.session.record_entry();
        Ok(())
    }

    /// Appends the terminal chunk and flushes the sink. Ends the session.
    pub fn close(&mut self) -> Result<()> {
        self.session.close()?;
        self.sink.write_all(&terminal_chunk())?;
        self.sink.flush()?;
        log::debug!(
            "chunk writer closed after {} tEXt chunk(s)",
            self.session.entries()
        );
        Ok(())
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    /// Number of text chunks written so far.
    pub fn entries_written(&self) -> usize {
        self.session.entries()
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
