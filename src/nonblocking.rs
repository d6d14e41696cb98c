//! Async counterparts of the sink writers, over `tokio::io::AsyncWrite`.
//!
//! Every piece is awaited before the next one starts, so a sink that applies
//! backpressure simply suspends the emission. The pieces come from the same
//! builders the blocking writers use, so both produce identical output.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::writer::{passthrough_pieces, terminal_chunk, Session, TextPieces};

/// Async version of [`write_to`](crate::write_to). The sink is shut down after
/// the terminal chunk.
pub async fn write_async<W, I, K, V>(source: &[u8], entries: I, mut sink: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    write_pieces(&mut sink, &passthrough_pieces(source)?).await?;
    let mut count = 0usize;
    for (key, value) in entries {
        let text = TextPieces::new(key.as_ref(), value.as_ref())?;
        write_pieces(&mut sink, &text.pieces()).await?;
        count += 1;
    }
    sink.write_all(&terminal_chunk()).await?;
    sink.shutdown().await?;
    log::debug!("wrote {count} tEXt chunk(s)");
    Ok(())
}

async fn write_pieces<W: AsyncWrite + Unpin>(sink: &mut W, pieces: &[&[u8]]) -> Result<()> {
    for piece in pieces {
        sink.write_all(piece).await?;
    }
    Ok(())
}

/// Async version of [`ChunkWriter`](crate::ChunkWriter).
pub struct AsyncChunkWriter<W: AsyncWrite + Unpin> {
    sink: W,
    session: Session,
}

impl<W: AsyncWrite + Unpin> AsyncChunkWriter<W> {
    /// Starts a session: copies the signature and every non-text chunk of `source`.
    pub async fn open(source: &[u8], mut sink: W) -> Result<Self> {
        write_pieces(&mut sink, &passthrough_pieces(source)?).await?;
        Ok(Self {
            sink,
            session: Session::default(),
        })
    }

    /// Appends one text chunk.
    pub async fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.session.ensure_open()?;
        let text = TextPieces::new(key, value)?;
        write_pieces(&mut self.sink, &text.pieces()).await?;
        self.session.record_entry();
        Ok(())
    }

    /// Appends the terminal chunk and shuts the sink down.
    pub async fn close(&mut self) -> Result<()> {
        self.session.close()?;
        self.sink.write_all(&terminal_chunk()).await?;
        self.sink.shutdown().await?;
        log::debug!(
            "async chunk writer closed after {} tEXt chunk(s)",
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
